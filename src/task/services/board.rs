//! Task board operations: task CRUD, claiming, reporting, and read models.

use super::{
    Contribution, ContributionSummary, ScoreSettlementService, TaskBoardEntry, TaskServiceError,
    TaskServiceResult, UNASSIGNED_LABEL,
};
use crate::audit::{
    domain::{AuditAction, AuditEntry},
    ports::AuditLogRepository,
    services::AuditLogger,
};
use crate::identity::Caller;
use crate::member::{
    domain::{Member, MemberId},
    ports::MemberRepository,
};
use crate::storage::{
    domain::{BlobPath, is_valid_segment},
    ports::BlobStore,
};
use crate::task::{
    domain::{
        ActivityReport, Attachment, ClaimOutcome, NewActivityReport, Points, ReviewScore, Task,
        TaskDomainError, TaskId, TaskTitle, VoteScore,
    },
    ports::TaskStore,
};
use mockable::Clock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Default number of audit entries returned by the activity feed.
pub const DEFAULT_AUDIT_FEED_LIMIT: usize = 50;

/// Manual edit of a task's fields. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    title: Option<String>,
    description: Option<Option<String>>,
    assignee: Option<Option<MemberId>>,
    total_score: Option<Points>,
}

impl TaskUpdate {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Option<MemberId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Overrides the vote total.
    #[must_use]
    pub const fn with_total_score(mut self, total: Points) -> Self {
        self.total_score = Some(total);
        self
    }
}

/// File uploaded alongside an activity report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    file_name: String,
    contents: Vec<u8>,
}

impl AttachmentUpload {
    /// Creates an upload from a client file name and its bytes.
    #[must_use]
    pub fn new(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }
}

/// Activity report submitted by a task's assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSubmission {
    title: String,
    content: String,
    attachment: Option<AttachmentUpload>,
}

impl ReportSubmission {
    /// Creates a submission without an attachment.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            attachment: None,
        }
    }

    /// Attaches a proof file.
    #[must_use]
    pub fn with_attachment(mut self, attachment: AttachmentUpload) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// An audit entry paired with its actor's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFeedItem {
    /// The recorded entry.
    pub entry: AuditEntry,
    /// Name of the acting member, when still known.
    pub actor_name: Option<String>,
}

/// Task board orchestration service.
pub struct TaskBoardService<S, M, A, B, C>
where
    S: TaskStore,
    M: MemberRepository,
    A: AuditLogRepository,
    B: BlobStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    members: Arc<M>,
    blobs: Arc<B>,
    audit: AuditLogger<A, C>,
    settlement: ScoreSettlementService<S, M, A, C>,
    clock: Arc<C>,
    audit_feed_limit: usize,
}

impl<S, M, A, B, C> TaskBoardService<S, M, A, B, C>
where
    S: TaskStore,
    M: MemberRepository,
    A: AuditLogRepository,
    B: BlobStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        members: Arc<M>,
        audit: Arc<A>,
        blobs: Arc<B>,
        clock: Arc<C>,
    ) -> Self {
        let settlement = ScoreSettlementService::new(
            Arc::clone(&store),
            Arc::clone(&members),
            Arc::clone(&audit),
            Arc::clone(&clock),
        );
        Self {
            store,
            members,
            blobs,
            audit: AuditLogger::new(audit, Arc::clone(&clock)),
            settlement,
            clock,
            audit_feed_limit: DEFAULT_AUDIT_FEED_LIMIT,
        }
    }

    /// Sets how many entries [`Self::recent_activity`] returns.
    #[must_use]
    pub const fn with_audit_feed_limit(mut self, limit: usize) -> Self {
        self.audit_feed_limit = limit;
        self
    }

    /// Returns the settlement service sharing this board's collaborators.
    #[must_use]
    pub const fn settlement(&self) -> &ScoreSettlementService<S, M, A, C> {
        &self.settlement
    }

    /// Creates an unassigned task with a zero total.
    ///
    /// Anonymous callers may create tasks; only known callers are audited.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is invalid.
    pub async fn create_task(
        &self,
        caller: Caller,
        title: impl Into<String> + Send,
        description: Option<String>,
    ) -> TaskServiceResult<Task> {
        let task_title = TaskTitle::new(title)?;
        let task = Task::new(task_title, description, &*self.clock);
        self.store.store(&task).await?;
        if let Some(actor) = caller.member_id() {
            self.audit
                .record(
                    actor,
                    AuditAction::Create,
                    format!("Created task '{}'", task.title()),
                    Some(task.id()),
                )
                .await;
        }
        Ok(task)
    }

    /// Applies a manual edit, then re-settles the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::MemberNotFound`] for unknown identifiers, and
    /// [`TaskServiceError::Domain`] for an invalid title.
    pub async fn update_task(
        &self,
        caller: Caller,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> TaskServiceResult<Task> {
        let mut task = self.require_task(task_id).await?;
        let new_title = update.title.map(TaskTitle::new).transpose()?;
        if let Some(Some(member)) = update.assignee {
            self.require_member(member).await?;
        }

        if let Some(title) = new_title {
            task.rename(title, &*self.clock);
        }
        if let Some(description) = update.description {
            task.describe(description, &*self.clock);
        }
        if let Some(assignee) = update.assignee {
            task.reassign(assignee, &*self.clock);
        }
        if let Some(total) = update.total_score {
            task.set_total_score(total, &*self.clock);
        }
        self.store.update(&task).await?;

        if let Some(actor) = caller.member_id() {
            self.audit
                .record(
                    actor,
                    AuditAction::Update,
                    format!("Updated task '{}'", task.title()),
                    Some(task_id),
                )
                .await;
        }
        self.settlement.recompute(task_id).await
    }

    /// Deletes a task with its votes, reviews, and reports.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn delete_task(&self, caller: Caller, task_id: TaskId) -> TaskServiceResult<()> {
        self.require_task(task_id).await?;
        self.store.delete(task_id).await?;
        if let Some(actor) = caller.member_id() {
            self.audit
                .record(
                    actor,
                    AuditAction::Delete,
                    format!("Deleted task #{task_id}"),
                    Some(task_id),
                )
                .await;
        }
        Ok(())
    }

    /// Assigns an unheld task to the caller.
    ///
    /// Claiming a task the caller already holds succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`],
    /// [`TaskServiceError::TaskNotFound`], or
    /// [`TaskDomainError::AlreadyClaimed`] when another member holds the task.
    pub async fn claim_task(&self, caller: Caller, task_id: TaskId) -> TaskServiceResult<Task> {
        let member = caller.member_id().ok_or(TaskServiceError::Unauthenticated)?;
        let mut task = self.require_task(task_id).await?;
        if task.claim(member, &*self.clock)? == ClaimOutcome::Claimed {
            self.store.update(&task).await?;
            self.audit
                .record(member, AuditAction::Claim, "Claimed task", Some(task_id))
                .await;
        }
        Ok(task)
    }

    /// Stores an activity report, uploading its attachment first.
    ///
    /// When the upload fails nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`],
    /// [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::NotAssignee`] when the caller does not hold the
    /// task, [`TaskServiceError::Domain`] for a blank title or unusable file
    /// name, and [`TaskServiceError::Storage`] when the upload fails.
    pub async fn submit_report(
        &self,
        caller: Caller,
        task_id: TaskId,
        submission: ReportSubmission,
    ) -> TaskServiceResult<ActivityReport> {
        let author = caller.member_id().ok_or(TaskServiceError::Unauthenticated)?;
        let task = self.require_task(task_id).await?;
        if !task.is_assigned_to(author) {
            return Err(TaskServiceError::NotAssignee(task_id));
        }

        let mut draft = NewActivityReport::new(
            task_id,
            author,
            submission.title,
            submission.content,
            &*self.clock,
        )?;
        if let Some(upload) = submission.attachment {
            let attachment = self.upload_attachment(task_id, upload).await?;
            draft = draft.with_attachment(attachment);
        }

        let report = self.store.append_report(draft).await?;
        self.audit
            .record(
                author,
                AuditAction::Report,
                format!("Submitted activity report #{}", report.sequence()),
                Some(task_id),
            )
            .await;
        Ok(report)
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn get_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.require_task(task_id).await
    }

    /// Lists members ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Members`] when the lookup fails.
    pub async fn list_members(&self) -> TaskServiceResult<Vec<Member>> {
        Ok(self.members.list_by_name().await?)
    }

    /// Builds the board as seen by `caller`, newest tasks first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when any lookup fails.
    pub async fn board(&self, caller: Caller) -> TaskServiceResult<Vec<TaskBoardEntry>> {
        let tasks = self.store.list_newest_first().await?;
        let names = self.member_names().await?;
        let review_counts = self.store.review_counts().await?;
        let (my_votes, my_reviews) = self.own_scores(caller).await?;

        let mut entries = Vec::with_capacity(tasks.len());
        for task in tasks {
            let id = task.id();
            let assignee_name = task
                .assignee()
                .and_then(|member| names.get(&member).cloned())
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_owned());
            entries.push(TaskBoardEntry {
                assignee_name,
                my_vote: my_votes.get(&id).copied(),
                my_review: my_reviews.get(&id).copied(),
                reports: self.store.reports_for_task(id).await?,
                review_count: review_counts.get(&id).copied().unwrap_or(0),
                task,
            });
        }
        Ok(entries)
    }

    /// Sums total and achieved scores per assignee.
    ///
    /// Unassigned tasks are left out.
    ///
    /// # Errors
    ///
    /// Returns a repository error when any lookup fails.
    pub async fn contributions(&self) -> TaskServiceResult<ContributionSummary> {
        let tasks = self.store.list_newest_first().await?;
        let names = self.member_names().await?;

        let mut totals: HashMap<MemberId, (Points, Points)> = HashMap::new();
        for task in &tasks {
            let Some(member) = task.assignee() else {
                continue;
            };
            let slot = totals.entry(member).or_insert((Points::ZERO, Points::ZERO));
            slot.0 = slot.0.saturating_add(task.total_score());
            slot.1 = slot
                .1
                .saturating_add(task.achieved_score().unwrap_or(Points::ZERO));
        }

        let mut ordered: BTreeMap<(String, MemberId), (Points, Points)> = BTreeMap::new();
        for (member, sums) in totals {
            let name = names
                .get(&member)
                .cloned()
                .unwrap_or_else(|| member.to_string());
            ordered.insert((name, member), sums);
        }

        let project_total = ordered.values().map(|(total, _)| *total).sum();
        let members = ordered
            .into_iter()
            .map(|((name, member), (total, achieved))| {
                Contribution::new(member, name, total, achieved)
            })
            .collect();
        Ok(ContributionSummary {
            members,
            project_total,
        })
    }

    /// Returns the latest audit entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Audit`] when the trail cannot be read.
    pub async fn recent_activity(&self) -> TaskServiceResult<Vec<ActivityFeedItem>> {
        let entries = self.audit.recent(self.audit_feed_limit).await?;
        let names = self.member_names().await?;
        Ok(entries
            .into_iter()
            .map(|entry| ActivityFeedItem {
                actor_name: names.get(&entry.actor).cloned(),
                entry,
            })
            .collect())
    }

    async fn upload_attachment(
        &self,
        task_id: TaskId,
        upload: AttachmentUpload,
    ) -> TaskServiceResult<Attachment> {
        let file_name = upload.file_name.trim();
        if !is_valid_segment(file_name) || file_name.contains('/') {
            return Err(TaskDomainError::InvalidAttachmentName(upload.file_name).into());
        }
        let millis = self.clock.utc().timestamp_millis();
        let path = BlobPath::new(format!("{task_id}/{millis}-{file_name}"))
            .map_err(|_| TaskDomainError::InvalidAttachmentName(file_name.to_owned()))?;

        if let Err(err) = self.blobs.put(&path, &upload.contents).await {
            tracing::warn!(error = %err, %task_id, path = %path, "attachment upload failed");
            return Err(err.into());
        }
        Ok(Attachment::for_contents(
            self.blobs.public_url(&path),
            &upload.contents,
        ))
    }

    async fn own_scores(
        &self,
        caller: Caller,
    ) -> TaskServiceResult<(HashMap<TaskId, VoteScore>, HashMap<TaskId, ReviewScore>)> {
        let Some(member) = caller.member_id() else {
            return Ok((HashMap::new(), HashMap::new()));
        };
        let votes = self
            .store
            .votes_by_voter(member)
            .await?
            .into_iter()
            .map(|vote| (vote.task_id(), vote.score()))
            .collect();
        let reviews = self
            .store
            .reviews_by_reviewer(member)
            .await?
            .into_iter()
            .map(|review| (review.task_id(), review.score()))
            .collect();
        Ok((votes, reviews))
    }

    async fn member_names(&self) -> TaskServiceResult<HashMap<MemberId, String>> {
        Ok(self
            .members
            .list_by_name()
            .await?
            .into_iter()
            .map(|member| (member.id(), member.name().as_str().to_owned()))
            .collect())
    }

    async fn require_member(&self, member: MemberId) -> TaskServiceResult<Member> {
        self.members
            .find_by_id(member)
            .await?
            .ok_or(TaskServiceError::MemberNotFound(member))
    }

    async fn require_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }
}
