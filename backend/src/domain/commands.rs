//! Domain-level command and query types.
//!
//! These structs are the inputs the services accept. A frontend layer
//! (or the demo binary) builds them from form state; the services own
//! validation and id assignment.

pub mod transactions {
    use chrono::NaiveDate;
    use shared::TransactionType;

    /// Input for creating a new transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub description: String,
        pub amount: f64,
        pub transaction_type: TransactionType,
        pub category: String,
        pub date: NaiveDate,
    }

    /// Input for updating an existing transaction.
    #[derive(Debug, Clone)]
    pub struct UpdateTransactionCommand {
        pub id: u64,
        pub description: String,
        pub amount: f64,
        pub transaction_type: TransactionType,
        pub category: String,
        pub date: NaiveDate,
    }

    /// Query parameters for listing transactions.
    #[derive(Debug, Clone, Default)]
    pub struct TransactionListQuery {
        /// Restrict to one type; `None` lists both.
        pub transaction_type: Option<TransactionType>,
        /// Case-insensitive substring match on the description.
        pub search: Option<String>,
    }
}

pub mod goals {
    use chrono::NaiveDate;

    /// Input for creating a new goal.
    #[derive(Debug, Clone)]
    pub struct CreateGoalCommand {
        pub name: String,
        pub current_amount: f64,
        pub target_amount: f64,
        pub target_date: NaiveDate,
    }

    /// Input for updating a goal.
    #[derive(Debug, Clone)]
    pub struct UpdateGoalCommand {
        pub id: u64,
        pub name: String,
        /// The running total is otherwise only grown by contributions;
        /// an edit replaces it outright.
        pub current_amount: f64,
        pub target_amount: f64,
        pub target_date: NaiveDate,
    }

    /// Input for adding money to a goal.
    #[derive(Debug, Clone)]
    pub struct ContributeToGoalCommand {
        pub id: u64,
        pub amount: f64,
    }
}

pub mod events {
    use chrono::NaiveDate;
    use shared::{EventStatus, Reminder, Urgency};

    /// Input for creating a new calendar event.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
        pub title: String,
        pub date: NaiveDate,
        pub amount: f64,
        pub status: EventStatus,
        pub urgency: Urgency,
        pub time: Option<String>,
        pub notes: Option<String>,
        pub reminder: Reminder,
    }

    /// Input for updating a calendar event.
    #[derive(Debug, Clone)]
    pub struct UpdateEventCommand {
        pub id: u64,
        pub title: String,
        pub date: NaiveDate,
        pub amount: f64,
        pub status: EventStatus,
        pub urgency: Urgency,
        pub time: Option<String>,
        pub notes: Option<String>,
        pub reminder: Reminder,
    }
}

pub mod boletos {
    use chrono::NaiveDate;

    /// Input for creating or replacing a checklist boleto.
    #[derive(Debug, Clone)]
    pub struct UpsertBoletoCommand {
        /// `None` creates a new boleto; `Some` replaces an existing one.
        pub id: Option<u64>,
        pub name: String,
        pub amount: f64,
        pub due_date: NaiveDate,
        pub paid: bool,
    }
}

pub mod community {
    use shared::{CommunityTopic, PostAttachment};

    /// Input for publishing a new post.
    #[derive(Debug, Clone)]
    pub struct CreatePostCommand {
        pub author: String,
        pub author_avatar: Option<String>,
        pub topic: CommunityTopic,
        pub content: String,
        pub attachment: Option<PostAttachment>,
    }

    /// Feed filter; `None` is the "Todos" tab.
    #[derive(Debug, Clone, Default)]
    pub struct FeedQuery {
        pub topic: Option<CommunityTopic>,
    }

    /// Input for commenting on a post.
    #[derive(Debug, Clone)]
    pub struct AddCommentCommand {
        pub post_id: u64,
        pub author: String,
        pub author_avatar: Option<String>,
        pub content: String,
    }

    /// Input for voting on one option of a post's poll.
    #[derive(Debug, Clone)]
    pub struct VotePollCommand {
        pub post_id: u64,
        pub option_id: u64,
    }
}
