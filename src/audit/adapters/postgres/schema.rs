//! Diesel schema for the audit trail.

diesel::table! {
    /// Append-only audit entries.
    system_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Acting member.
        user_id -> Uuid,
        /// Action kind.
        #[max_length = 20]
        action_type -> Varchar,
        /// Human-readable description.
        details -> Text,
        /// Related task, if any. Not a foreign key: entries outlive tasks.
        related_task_id -> Nullable<Uuid>,
        /// Time of the action.
        created_at -> Timestamptz,
    }
}
