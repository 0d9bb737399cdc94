//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Expenses, each owned by exactly one user.
    expenses (id) {
        id -> Uuid,
        user_id -> Uuid,
        description -> Varchar,
        amount_cents -> Int8,
        spent_on -> Date,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(expenses -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, expenses);
