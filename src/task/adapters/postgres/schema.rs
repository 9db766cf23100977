//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with their derived scores.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Assigned member, if claimed.
        member_id -> Nullable<Uuid>,
        /// Sum of votes, in half points.
        total_score_halves -> Int8,
        /// Settled score in half points, once peer review completes.
        achieved_score_halves -> Nullable<Int8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One vote per (task, member).
    votes (task_id, user_id) {
        /// Voted task.
        task_id -> Uuid,
        /// Voting member.
        user_id -> Uuid,
        /// Vote in half points (0 to 20).
        score_halves -> Int2,
        /// Time of the latest vote.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One review per (task, reviewer).
    achievement_reviews (task_id, reviewer_id) {
        /// Reviewed task.
        task_id -> Uuid,
        /// Reviewing member.
        reviewer_id -> Uuid,
        /// Review score on the 0/2/3/5 scale.
        score -> Int2,
        /// Time of the latest review.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Activity reports, unique per (task, sequence).
    activities (id) {
        /// Report identifier.
        id -> Uuid,
        /// Reported task.
        task_id -> Uuid,
        /// Submitting member.
        user_id -> Uuid,
        /// Report title.
        title -> Text,
        /// Report body.
        content -> Text,
        /// Public URL of the attachment, if any.
        file_url -> Nullable<Text>,
        /// Hex SHA-256 digest of the attachment, if any.
        #[max_length = 64]
        file_sha256 -> Nullable<Varchar>,
        /// Per-task sequence number, starting at 1.
        sequence -> Int4,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, votes, achievement_reviews, activities);
