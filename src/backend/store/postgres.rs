//! PostgreSQL `SocialStore`
//!
//! Friend sets live in `user_friends` (one row per direction). Uniqueness of
//! friend requests per unordered pair and of notifications per
//! (sender, recipient, message id) is enforced by indexes declared in
//! `migrations/`, so concurrent duplicates are rejected by the database.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{NotificationInsert, SocialStore, StoreError, StoreResult, UserCredentials};
use crate::shared::social::{
    AcceptedFriendRequest, FriendProfile, FriendRequest, FriendRequestStatus,
    IncomingFriendRequest, MessageNotification, NewMessageNotification, NewUser,
    NotificationWithSender, OnboardingProfile, OutgoingFriendRequest, User, UserBadge,
};

const USER_COLUMNS: &str = r#"
    u.id, u.full_name, u.email, u.bio, u.profile_pic, u.native_language,
    u.learning_language, u.location, u.is_onboarded,
    ARRAY(SELECT f.friend_id FROM user_friends f WHERE f.user_id = u.id ORDER BY f.created_at) AS friends,
    u.created_at, u.updated_at
"#;

const REQUEST_COLUMNS: &str =
    "fr.id, fr.sender_id, fr.recipient_id, fr.status, fr.created_at, fr.updated_at";

const NOTIFICATION_COLUMNS: &str = r#"
    n.id, n.sender_id, n.recipient_id, n.message_id, n.channel_id, n.message_text,
    n.is_read, n.created_at, n.updated_at
"#;

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

fn map_unique(err: sqlx::Error, what: &'static str) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Duplicate(what);
        }
    }
    StoreError::Database(err)
}

fn friend_request_from_row(row: &PgRow) -> Result<FriendRequest, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = FriendRequestStatus::parse(&status).map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })?;
    Ok(FriendRequest {
        id: row.try_get("id")?,
        sender: row.try_get("sender_id")?,
        recipient: row.try_get("recipient_id")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn notification_from_row(row: &PgRow) -> Result<MessageNotification, sqlx::Error> {
    Ok(MessageNotification {
        id: row.try_get("id")?,
        sender: row.try_get("sender_id")?,
        recipient: row.try_get("recipient_id")?,
        message_id: row.try_get("message_id")?,
        channel_id: row.try_get("channel_id")?,
        message_text: row.try_get("message_text")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Profile of the joined user `u`
fn profile_from_row(row: &PgRow) -> Result<FriendProfile, sqlx::Error> {
    Ok(FriendProfile {
        id: row.try_get("user_id")?,
        full_name: row.try_get("full_name")?,
        profile_pic: row.try_get("profile_pic")?,
        native_language: row.try_get("native_language")?,
        learning_language: row.try_get("learning_language")?,
    })
}

fn badge_from_row(row: &PgRow) -> Result<UserBadge, sqlx::Error> {
    Ok(UserBadge {
        id: row.try_get("user_id")?,
        full_name: row.try_get("full_name")?,
        profile_pic: row.try_get("profile_pic")?,
    })
}

/// `SocialStore` backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SocialStore for PostgresStore {
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, profile_pic, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(id)
        .bind(&new_user.full_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.profile_pic)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "email"))?;

        self.find_user(id).await?.ok_or(StoreError::Inconsistent("user"))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            "SELECT {USER_COLUMNS}, u.password_hash FROM users u WHERE lower(u.email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| UserCredentials {
            user: r.user,
            password_hash: r.password_hash,
        }))
    }

    async fn complete_onboarding(
        &self,
        id: Uuid,
        profile: &OnboardingProfile,
    ) -> StoreResult<Option<User>> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, bio = $3, native_language = $4, learning_language = $5,
                location = $6, is_onboarded = TRUE, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.native_language)
        .bind(&profile.learning_language)
        .bind(&profile.location)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_user(id).await
    }

    async fn recommended_users(&self, user_id: Uuid) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            WHERE u.id <> $1
              AND u.is_onboarded
              AND NOT EXISTS (
                  SELECT 1 FROM user_friends f WHERE f.user_id = $1 AND f.friend_id = u.id
              )
            ORDER BY u.created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn friends_of(&self, user_id: Uuid) -> StoreResult<Vec<FriendProfile>> {
        let friends = sqlx::query_as::<_, FriendProfile>(
            r#"
            SELECT u.id, u.full_name, u.profile_pic, u.native_language, u.learning_language
            FROM user_friends f
            JOIN users u ON u.id = f.friend_id
            WHERE f.user_id = $1
            ORDER BY f.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(friends)
    }

    async fn find_friend_request_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> StoreResult<Option<FriendRequest>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM friend_requests fr
            WHERE (fr.sender_id = $1 AND fr.recipient_id = $2)
               OR (fr.sender_id = $2 AND fr.recipient_id = $1)
            LIMIT 1
            "#
        ))
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(friend_request_from_row).transpose()?)
    }

    async fn insert_friend_request(
        &self,
        sender: Uuid,
        recipient: Uuid,
    ) -> StoreResult<FriendRequest> {
        let request = FriendRequest::new(sender, recipient);

        sqlx::query(
            r#"
            INSERT INTO friend_requests (id, sender_id, recipient_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(request.id)
        .bind(request.sender)
        .bind(request.recipient)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, "friend request"))?;

        Ok(request)
    }

    async fn find_friend_request(&self, id: Uuid) -> StoreResult<Option<FriendRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM friend_requests fr WHERE fr.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(friend_request_from_row).transpose()?)
    }

    async fn accept_friend_request(&self, id: Uuid) -> StoreResult<Option<FriendRequest>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE friend_requests AS fr
            SET status = 'accepted', updated_at = $2
            WHERE fr.id = $1
            RETURNING fr.id, fr.sender_id, fr.recipient_id, fr.status, fr.created_at, fr.updated_at
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        let request = friend_request_from_row(&row)?;

        sqlx::query(
            r#"
            INSERT INTO user_friends (user_id, friend_id, created_at)
            VALUES ($1, $2, $3), ($2, $1, $3)
            ON CONFLICT (user_id, friend_id) DO NOTHING
            "#,
        )
        .bind(request.sender)
        .bind(request.recipient)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET updated_at = $3 WHERE id = $1 OR id = $2")
            .bind(request.sender)
            .bind(request.recipient)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(request))
    }

    async fn incoming_friend_requests(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<IncomingFriendRequest>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REQUEST_COLUMNS},
                   u.id AS user_id, u.full_name, u.profile_pic, u.native_language, u.learning_language
            FROM friend_requests fr
            JOIN users u ON u.id = fr.sender_id
            WHERE fr.recipient_id = $1 AND fr.status = 'pending'
            ORDER BY fr.created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<IncomingFriendRequest, sqlx::Error> {
                let request = friend_request_from_row(row)?;
                let recipient = request.recipient;
                Ok(request.with_parties(profile_from_row(row)?, recipient))
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(StoreError::from)
    }

    async fn accepted_friend_requests(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<AcceptedFriendRequest>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}, u.id AS user_id, u.full_name, u.profile_pic
            FROM friend_requests fr
            JOIN users u ON u.id = fr.recipient_id
            WHERE fr.sender_id = $1 AND fr.status = 'accepted'
            ORDER BY fr.created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<AcceptedFriendRequest, sqlx::Error> {
                let request = friend_request_from_row(row)?;
                let sender = request.sender;
                Ok(request.with_parties(sender, badge_from_row(row)?))
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(StoreError::from)
    }

    async fn outgoing_friend_requests(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OutgoingFriendRequest>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {REQUEST_COLUMNS},
                   u.id AS user_id, u.full_name, u.profile_pic, u.native_language, u.learning_language
            FROM friend_requests fr
            JOIN users u ON u.id = fr.recipient_id
            WHERE fr.sender_id = $1 AND fr.status = 'pending'
            ORDER BY fr.created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<OutgoingFriendRequest, sqlx::Error> {
                let request = friend_request_from_row(row)?;
                let sender = request.sender;
                Ok(request.with_parties(sender, profile_from_row(row)?))
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(StoreError::from)
    }

    async fn count_pending_requests(&self, user_id: Uuid) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM friend_requests WHERE recipient_id = $1 AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn find_notification(
        &self,
        sender: Uuid,
        recipient: Uuid,
        message_id: &str,
    ) -> StoreResult<Option<MessageNotification>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM message_notifications n
            WHERE n.sender_id = $1 AND n.recipient_id = $2 AND n.message_id = $3
            "#
        ))
        .bind(sender)
        .bind(recipient)
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(notification_from_row).transpose()?)
    }

    async fn insert_notification(
        &self,
        notification: NewMessageNotification,
    ) -> StoreResult<NotificationInsert> {
        let (sender, recipient, message_id) = (
            notification.sender,
            notification.recipient,
            notification.message_id.clone(),
        );
        let record = notification.into_record();

        let inserted = sqlx::query(
            r#"
            INSERT INTO message_notifications
                (id, sender_id, recipient_id, message_id, channel_id, message_text, is_read, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8)
            ON CONFLICT (sender_id, recipient_id, message_id) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(record.sender)
        .bind(record.recipient)
        .bind(&record.message_id)
        .bind(&record.channel_id)
        .bind(&record.message_text)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() == 1 {
            return Ok(NotificationInsert::Created(record));
        }

        self.find_notification(sender, recipient, &message_id)
            .await?
            .map(NotificationInsert::Existing)
            .ok_or(StoreError::Inconsistent("message notification"))
    }

    async fn unread_notifications(&self, user_id: Uuid) -> StoreResult<Vec<NotificationWithSender>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}, u.id AS user_id, u.full_name, u.profile_pic
            FROM message_notifications n
            JOIN users u ON u.id = n.sender_id
            WHERE n.recipient_id = $1 AND NOT n.is_read
            ORDER BY n.created_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<NotificationWithSender, sqlx::Error> {
                Ok(notification_from_row(row)?.with_sender(badge_from_row(row)?))
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(StoreError::from)
    }

    async fn mark_notifications_read(&self, user_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE message_notifications
            SET is_read = TRUE, updated_at = $2
            WHERE recipient_id = $1 AND NOT is_read
            "#,
        )
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM message_notifications WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
