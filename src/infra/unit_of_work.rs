//! Unit of Work pattern implementation.
//!
//! The Unit of Work:
//! - Centralizes access to the read repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Hands out transaction-bound repositories for multi-step workflows
//!   (offboarding, enrollment) that must commit or roll back as one unit

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DatabaseTransaction, EntityTrait, IsolationLevel, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{
    account, appointment, patient, specialist, AccountEntity, AppointmentEntity, PatientEntity,
    SpecialistEntity,
};
use super::repositories::{
    party_column, AccountRepository, AccountStore, AppointmentRepository, AppointmentStore,
    ProfileRepository, ProfileStore, RoleStore, RoleUpdate,
};
use crate::domain::{
    Account, Appointment, Profile, ProfileDetails, ProfileKind, ProfileRef, ProfileStatus, Role,
    RoleAssignable,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, run against an in-memory SQLite `Persistence`.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;

    /// Get profile repository
    fn profiles(&self) -> Arc<dyn ProfileRepository>;

    /// Get appointment repository
    fn appointments(&self) -> Arc<dyn AppointmentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Accounts and role assignment
    pub fn accounts(&self) -> TxAccountRepository<'_> {
        TxAccountRepository { txn: self.txn }
    }

    /// Patient and specialist profiles
    pub fn profiles(&self) -> TxProfileRepository<'_> {
        TxProfileRepository { txn: self.txn }
    }

    /// Appointments
    pub fn appointments(&self) -> TxAppointmentRepository<'_> {
        TxAppointmentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    account_repo: Arc<AccountStore>,
    profile_repo: Arc<ProfileStore>,
    appointment_repo: Arc<AppointmentStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            account_repo: Arc::new(AccountStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db.clone())),
            appointment_repo: Arc::new(AppointmentStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware account repository.
///
/// Soft-deleted accounts never resolve.
pub struct TxAccountRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAccountRepository<'a> {
    /// Find active account by ID
    pub async fn find_active(&self, id: Uuid) -> AppResult<Option<Account>> {
        let result = AccountEntity::find_by_id(id)
            .filter(account::Column::DeletedAt.is_null())
            .one(self.txn)
            .await?;

        Ok(result.map(Account::from))
    }

    /// Create a new account with the basic role
    pub async fn create(&self, email: String, name: String) -> AppResult<Account> {
        let existing = AccountEntity::find()
            .filter(account::Column::Email.eq(email.as_str()))
            .one(self.txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("Account"));
        }

        let account = Account::new(Uuid::new_v4(), email, name);
        let active_model = account::ActiveModel {
            id: Set(account.id),
            email: Set(account.email.clone()),
            name: Set(account.name.clone()),
            role: Set(account.role.into()),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
            deleted_at: Set(None),
        };

        let model = active_model.insert(self.txn).await?;
        Ok(Account::from(model))
    }

    /// Soft delete account by ID (sets deleted_at timestamp)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let model = AccountEntity::find_by_id(id)
            .filter(account::Column::DeletedAt.is_null())
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: account::ActiveModel = model.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(self.txn).await?;
        Ok(())
    }
}

#[async_trait]
impl<'a> RoleStore for TxAccountRepository<'a> {
    async fn set_role(&self, account_id: Uuid, role: Role) -> AppResult<RoleUpdate> {
        let Some(model) = AccountEntity::find_by_id(account_id)
            .filter(account::Column::DeletedAt.is_null())
            .one(self.txn)
            .await?
        else {
            return Ok(RoleUpdate::Unresolved);
        };

        let mut account = Account::from(model.clone());
        if !account.assign_role(role) {
            return Ok(RoleUpdate::Unchanged);
        }

        let mut active: account::ActiveModel = model.into();
        active.role = Set(account.role.into());
        active.updated_at = Set(account.updated_at);
        active.update(self.txn).await?;

        Ok(RoleUpdate::Changed)
    }
}

/// Transaction-aware profile repository (patients and specialists).
pub struct TxProfileRepository<'a> {
    txn: &'a DatabaseTransaction,
}

/// SQLite has no `SELECT ... FOR UPDATE`; its writer lock already serializes.
fn supports_row_locks(backend: DatabaseBackend) -> bool {
    !matches!(backend, DatabaseBackend::Sqlite)
}

impl<'a> TxProfileRepository<'a> {
    /// Load a profile and hold a row lock on it until the transaction ends.
    pub async fn lock(&self, profile: ProfileRef) -> AppResult<Option<Profile>> {
        let lock = supports_row_locks(self.txn.get_database_backend());

        let found = match profile.kind {
            ProfileKind::Patient => {
                let mut query = PatientEntity::find_by_id(profile.id);
                if lock {
                    query = query.lock_exclusive();
                }
                query.one(self.txn).await?.map(Profile::from)
            }
            ProfileKind::Specialist => {
                let mut query = SpecialistEntity::find_by_id(profile.id);
                if lock {
                    query = query.lock_exclusive();
                }
                query.one(self.txn).await?.map(Profile::from)
            }
        };

        Ok(found)
    }

    /// Find a profile without locking it
    pub async fn find(&self, profile: ProfileRef) -> AppResult<Option<Profile>> {
        let found = match profile.kind {
            ProfileKind::Patient => PatientEntity::find_by_id(profile.id)
                .one(self.txn)
                .await?
                .map(Profile::from),
            ProfileKind::Specialist => SpecialistEntity::find_by_id(profile.id)
                .one(self.txn)
                .await?
                .map(Profile::from),
        };

        Ok(found)
    }

    /// Profile of the given kind attached to an account, if any
    pub async fn find_for_account(
        &self,
        account_id: Uuid,
        kind: ProfileKind,
    ) -> AppResult<Option<Profile>> {
        let found = match kind {
            ProfileKind::Patient => PatientEntity::find()
                .filter(patient::Column::AccountId.eq(account_id))
                .one(self.txn)
                .await?
                .map(Profile::from),
            ProfileKind::Specialist => SpecialistEntity::find()
                .filter(specialist::Column::AccountId.eq(account_id))
                .one(self.txn)
                .await?
                .map(Profile::from),
        };

        Ok(found)
    }

    /// Create an active profile for an account
    pub async fn create(
        &self,
        account_id: Uuid,
        details: ProfileDetails,
        admitted_on: NaiveDate,
    ) -> AppResult<Profile> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let status = ProfileStatus::Active.as_str().to_string();

        let profile = match details {
            ProfileDetails::Patient { specialist_id } => {
                let model = patient::ActiveModel {
                    id: Set(id),
                    account_id: Set(Some(account_id)),
                    specialist_id: Set(specialist_id),
                    admitted_on: Set(admitted_on),
                    discharged_on: Set(None),
                    status: Set(status),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(self.txn)
                .await?;
                Profile::from(model)
            }
            ProfileDetails::Specialist { specialty } => {
                let model = specialist::ActiveModel {
                    id: Set(id),
                    account_id: Set(Some(account_id)),
                    specialty: Set(specialty),
                    admitted_on: Set(admitted_on),
                    discharged_on: Set(None),
                    status: Set(status),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(self.txn)
                .await?;
                Profile::from(model)
            }
        };

        Ok(profile)
    }

    /// Permanently delete a profile row
    pub async fn hard_delete(&self, profile: ProfileRef) -> AppResult<()> {
        let result = match profile.kind {
            ProfileKind::Patient => PatientEntity::delete_by_id(profile.id).exec(self.txn).await?,
            ProfileKind::Specialist => {
                SpecialistEntity::delete_by_id(profile.id)
                    .exec(self.txn)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Transaction-aware appointment repository.
pub struct TxAppointmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAppointmentRepository<'a> {
    /// Active appointments of a profile, oldest first.
    ///
    /// With `since`, only appointments scheduled at or after that instant.
    pub async fn for_profile(
        &self,
        profile: ProfileRef,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Appointment>> {
        let mut query = AppointmentEntity::find()
            .filter(party_column(profile.kind).eq(profile.id))
            .filter(appointment::Column::DeletedAt.is_null());

        if let Some(since) = since {
            query = query.filter(appointment::Column::ScheduledAt.gte(since));
        }

        let models = query
            .order_by_asc(appointment::Column::ScheduledAt)
            .all(self.txn)
            .await?;

        Ok(models.into_iter().map(Appointment::from).collect())
    }

    /// Insert an appointment row
    pub async fn create(&self, appointment: &Appointment) -> AppResult<Appointment> {
        let model = appointment::ActiveModel {
            id: Set(appointment.id),
            patient_id: Set(appointment.patient_id),
            specialist_id: Set(appointment.specialist_id),
            scheduled_at: Set(appointment.scheduled_at),
            kind: Set(appointment.kind.as_str().to_string()),
            status: Set(appointment.status.as_str().to_string()),
            comment: Set(appointment.comment.clone()),
            created_at: Set(appointment.created_at),
            updated_at: Set(appointment.updated_at),
            deleted_at: Set(appointment.deleted_at),
        }
        .insert(self.txn)
        .await?;

        Ok(Appointment::from(model))
    }

    /// Permanently delete appointments, bypassing soft delete.
    ///
    /// Returns the number of rows removed.
    pub async fn hard_delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = AppointmentEntity::delete_many()
            .filter(appointment::Column::Id.is_in(ids.iter().copied()))
            .exec(self.txn)
            .await?;

        Ok(result.rows_affected)
    }
}
