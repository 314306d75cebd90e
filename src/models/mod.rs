pub mod feedback;

pub use feedback::{
    CreateFeedbackPayload, ErrorBody, FeedbackRecord, FeedbackResponse, NewFeedback, Rating,
    StatusMessage,
};
