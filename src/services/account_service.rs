use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::users::{ActiveModel, Column, Entity as Users},
    error::{AppError, AppResult, write_error},
    hashing::{check_password, make_password},
    middleware::auth::{self, AuthUser},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{normalize_email, validate_password, validate_phone, validate_username},
};

const DUPLICATE_PHONE: &str = "A user with that phone already exists.";
const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

/// Optional account attributes. Flags left as `None` take the defaults of the
/// creation routine that receives them.
#[derive(Debug, Default, Clone)]
pub struct UserFields {
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Creates a regular account; staff and superuser default to `false`.
pub async fn create_user(
    state: &AppState,
    phone: &str,
    email: Option<&str>,
    password: Option<&str>,
    mut extra: UserFields,
) -> AppResult<User> {
    extra.is_staff.get_or_insert(false);
    extra.is_superuser.get_or_insert(false);
    insert_user(state, phone, email, password, extra).await
}

/// Creates an account with both staff and superuser set. Explicitly passing
/// either flag as `false` is rejected.
pub async fn create_superuser(
    state: &AppState,
    phone: &str,
    email: Option<&str>,
    password: Option<&str>,
    mut extra: UserFields,
) -> AppResult<User> {
    if !*extra.is_staff.get_or_insert(true) {
        return Err(AppError::validation("Superuser must have is_staff=True."));
    }
    if !*extra.is_superuser.get_or_insert(true) {
        return Err(AppError::validation("Superuser must have is_superuser=True."));
    }
    insert_user(state, phone, email, password, extra).await
}

async fn insert_user(
    state: &AppState,
    phone: &str,
    email: Option<&str>,
    password: Option<&str>,
    extra: UserFields,
) -> AppResult<User> {
    if phone.is_empty() {
        return Err(AppError::validation("The given phone must be set"));
    }
    validate_phone(phone).map_err(AppError::Validation)?;

    let username = extra.username.filter(|u| !u.is_empty());
    if let Some(username) = username.as_deref() {
        validate_username(username).map_err(AppError::Validation)?;
    }

    if get_user_by_phone(state, phone).await?.is_some() {
        return Err(AppError::validation(DUPLICATE_PHONE));
    }
    if let Some(username) = username.as_deref() {
        let taken = Users::find()
            .filter(Column::Username.eq(username))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::validation(DUPLICATE_USERNAME));
        }
    }

    let email = normalize_email(email);
    let password = make_password(state.hasher.as_ref(), password)?;

    let active = ActiveModel {
        phone: Set(phone.to_string()),
        username: Set(username),
        email: Set(email),
        password: Set(password),
        first_name: Set(extra.first_name),
        last_name: Set(extra.last_name),
        is_active: Set(extra.is_active.unwrap_or(true)),
        is_staff: Set(extra.is_staff.unwrap_or(false)),
        is_superuser: Set(extra.is_superuser.unwrap_or(false)),
        date_joined: Set(Utc::now().fixed_offset()),
        last_login: Set(None),
        ..Default::default()
    };
    // The pre-checks above can race with a concurrent insert; the unique
    // indexes have the final word.
    let user = active
        .insert(&state.orm)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("username") => {
                AppError::validation(DUPLICATE_USERNAME)
            }
            _ => write_error(err, DUPLICATE_PHONE),
        })?;

    tracing::info!(
        user_id = user.id,
        is_staff = user.is_staff,
        is_superuser = user.is_superuser,
        "user created"
    );
    Ok(User::from(user))
}

pub async fn get_user_by_phone(state: &AppState, phone: &str) -> AppResult<Option<User>> {
    let user = Users::find()
        .filter(Column::Phone.eq(phone))
        .one(&state.orm)
        .await?
        .map(User::from);
    Ok(user)
}

/// Returns the superuser registered under `phone`, creating it when the phone
/// is free. An existing account without superuser rights is an error.
pub async fn ensure_superuser(
    state: &AppState,
    phone: &str,
    email: Option<&str>,
    password: &str,
) -> AppResult<User> {
    if let Some(existing) = get_user_by_phone(state, phone).await? {
        if !existing.is_superuser {
            return Err(AppError::validation(format!(
                "Account {phone} exists but is not a superuser."
            )));
        }
        return Ok(existing);
    }
    let user = create_superuser(state, phone, email, Some(password), UserFields::default()).await?;
    tracing::info!(user_id = user.id, "superuser created");
    Ok(user)
}

/// Resolves an account by phone and password. Unknown phones, wrong passwords
/// and inactive accounts all fail the same way.
pub async fn authenticate(state: &AppState, phone: &str, password: &str) -> AppResult<User> {
    let invalid = || AppError::BadRequest("Invalid phone or password".into());

    let user = Users::find()
        .filter(Column::Phone.eq(phone))
        .one(&state.orm)
        .await?
        .ok_or_else(invalid)?;

    if !check_password(state.hasher.as_ref(), password, &user.password) || !user.is_active {
        tracing::warn!(user_id = user.id, "rejected login attempt");
        return Err(invalid());
    }

    let mut active: ActiveModel = user.into();
    active.last_login = Set(Some(Utc::now().fixed_offset()));
    let user = active.update(&state.orm).await?;
    Ok(User::from(user))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        phone,
        password,
        email,
        username,
        first_name,
        last_name,
    } = payload;
    validate_password(&password).map_err(AppError::Validation)?;

    let extra = UserFields {
        username,
        first_name,
        last_name,
        ..Default::default()
    };
    let user = create_user(state, &phone, email.as_deref(), Some(&password), extra).await?;
    Ok(ApiResponse::success("User created", user, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { phone, password } = payload;
    let user = authenticate(state, &phone, &password).await?;
    let token = issue_token(&state.config.jwt_secret, &user)?;

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub fn issue_token(secret: &str, user: &User) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        is_staff: user.is_staff,
        is_superuser: user.is_superuser,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Removes an account together with every catalog and ledger row it created
/// or last updated.
pub async fn delete_user(
    state: &AppState,
    actor: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    auth::ensure_superuser(actor)?;
    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = id, deleted_by = actor.user_id, "user deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
