use crate::consts::{
    AFTER_HOURS_BUCKET, AFTER_HOURS_REPLY, STANDARD_REPLIES, VIP_CALLER_NAME, VIP_REPLY,
};
use crate::types::{CallEvent, ReplyAction, ResponseRecord};

use rand::seq::SliceRandom;
use rand::Rng;
use time::OffsetDateTime;

/// Decide which rule applies to a missed call. First match wins: after hours, then VIP, then
/// the standard reply.
pub fn classify(event: &CallEvent) -> ReplyAction {
    // Only the exact lowercase bucket counts; the caller name is matched case-insensitively.
    if event.time_of_day == AFTER_HOURS_BUCKET {
        ReplyAction::AfterHours
    } else if event.caller_name.to_lowercase() == VIP_CALLER_NAME {
        ReplyAction::Priority
    } else {
        ReplyAction::Standard
    }
}

/// Build the auto-reply for a missed call. Only the standard branch draws from `rng`.
pub fn select_response<R: Rng + ?Sized>(event: &CallEvent, rng: &mut R) -> ResponseRecord {
    let action = classify(event);
    let message_body = match action {
        ReplyAction::AfterHours => AFTER_HOURS_REPLY,
        ReplyAction::Priority => VIP_REPLY,
        ReplyAction::Standard => STANDARD_REPLIES
            .choose(rng)
            .copied()
            .unwrap_or(STANDARD_REPLIES[0]),
    };

    ResponseRecord {
        status: "success",
        action,
        message_body,
        simulated_delay: action.delay_secs(),
        timestamp: OffsetDateTime::now_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn event(caller_name: &str, time_of_day: &str) -> CallEvent {
        CallEvent {
            caller_name: caller_name.to_string(),
            time_of_day: time_of_day.to_string(),
        }
    }

    #[test]
    fn evening_wins_over_vip() {
        let mut rng = StdRng::seed_from_u64(1);
        for caller in ["Bob", "VIP Client", "vip client"] {
            let record = select_response(&event(caller, "evening"), &mut rng);
            assert_eq!(record.action, ReplyAction::AfterHours);
            assert_eq!(record.message_body, AFTER_HOURS_REPLY);
            assert_eq!(record.simulated_delay, 2);
            assert_eq!(record.status, "success");
        }
    }

    #[test]
    fn evening_match_is_case_sensitive() {
        assert_eq!(classify(&event("Bob", "Evening")), ReplyAction::Standard);
        assert_eq!(classify(&event("Bob", "EVENING")), ReplyAction::Standard);
        assert_eq!(classify(&event("VIP Client", "Evening")), ReplyAction::Priority);
    }

    #[test]
    fn vip_match_ignores_case() {
        let mut rng = StdRng::seed_from_u64(2);
        for caller in ["VIP Client", "vip client", "VIP CLIENT", "vIp ClIeNt"] {
            let record = select_response(&event(caller, "morning"), &mut rng);
            assert_eq!(record.action, ReplyAction::Priority);
            assert_eq!(record.message_body, VIP_REPLY);
            assert_eq!(record.simulated_delay, 1);
        }
    }

    #[test]
    fn vip_match_is_exact_apart_from_case() {
        assert_eq!(classify(&event(" VIP Client", "morning")), ReplyAction::Standard);
        assert_eq!(classify(&event("VIP Clients", "morning")), ReplyAction::Standard);
        assert_eq!(classify(&event("", "")), ReplyAction::Standard);
    }

    #[test]
    fn standard_reply_is_one_of_the_variations() {
        let mut rng = StdRng::seed_from_u64(3);
        for bucket in ["business_hours", "morning", "midnight", ""] {
            let record = select_response(&event("Bob", bucket), &mut rng);
            assert_eq!(record.action, ReplyAction::Standard);
            assert_eq!(record.simulated_delay, 2);
            assert!(STANDARD_REPLIES.contains(&record.message_body));
        }
    }

    #[test]
    fn standard_reply_covers_all_variations() {
        let mut rng = StdRng::seed_from_u64(4);
        let seen: HashSet<&str> = (0..200)
            .map(|_| select_response(&event("Stranger", "business_hours"), &mut rng).message_body)
            .collect();
        assert_eq!(seen.len(), STANDARD_REPLIES.len());
    }

    #[test]
    fn standard_variations_are_pinned() {
        assert_eq!(
            STANDARD_REPLIES,
            &[
                "Sorry I missed you! Can I text you back in a bit?",
                " missed your call. Is this urgent? I'm in a meeting.",
                "Hey, thanks for calling. Please leave a text and I'll get back to you!",
            ]
        );
    }

    #[test]
    fn fixed_branches_do_not_depend_on_the_rng() {
        let a = select_response(&event("Bob", "evening"), &mut StdRng::seed_from_u64(5));
        let b = select_response(&event("Bob", "evening"), &mut StdRng::seed_from_u64(6));
        assert_eq!(
            (a.action, a.message_body, a.simulated_delay),
            (b.action, b.message_body, b.simulated_delay)
        );
    }
}
