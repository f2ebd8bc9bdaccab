//! Influencer application promises.

use serde::{Deserialize, Serialize};

use crate::enums::Platform;
use crate::{Amount, ApplicationId, TaskId};

/// An influencer's committed reach for one platform of a task.
///
/// Created when an application is submitted; never mutated afterwards
/// except by cancellation of the parent application. Earnings are computed
/// from the influencer-side rate table, not the buyer rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPromise {
    /// The application this promise belongs to.
    pub application_id: ApplicationId,
    /// The task the application is for.
    pub task_id: TaskId,
    /// Influencer identity.
    pub influencer: String,
    /// Platform the reach is promised on.
    pub platform: Platform,
    /// Committed view count.
    pub promised_views: u64,
    /// Influencer earnings for delivering the promised views.
    pub earnings: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promise_serde_roundtrip() {
        let promise = ApplicationPromise {
            application_id: 11,
            task_id: 42,
            influencer: "creator-9".into(),
            platform: Platform::Tiktok,
            promised_views: 50_000,
            earnings: 100,
        };
        let json = serde_json::to_string(&promise).unwrap();
        let back: ApplicationPromise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, promise);
    }
}
