//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Lowercased email; unique across accounts.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Books saved by a user, unique per `(owner_id, external_id)`.
    saved_books (id) {
        id -> Uuid,
        /// Owning account.
        owner_id -> Uuid,
        /// Catalog work identifier, e.g. `OL1234W`.
        external_id -> Text,
        title -> Text,
        /// Author names; never empty.
        authors -> Array<Text>,
        publish_year -> Text,
        isbns -> Array<Text>,
        cover_url -> Nullable<Text>,
        description -> Text,
        subjects -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(saved_books -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(saved_books, users);
