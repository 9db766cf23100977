//! Diesel schema for member persistence.

diesel::table! {
    /// Team member records keyed by identity-provider user ID.
    users (id) {
        /// Identity-provider user identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional contact email.
        #[max_length = 255]
        email -> Nullable<Varchar>,
    }
}
