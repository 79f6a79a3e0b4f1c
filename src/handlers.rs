use crate::auto_reply::select_response;
use crate::consts::APP_BANNER;
use crate::types::{CallEvent, ResponseRecord};

use axum::Json;
use tracing::{info, info_span};
use uuid::Uuid;

pub async fn root_handler() -> &'static str {
    APP_BANNER
}

/// Handle `POST /api/missed-call`. Validation failures never reach this body; the `CallEvent`
/// extractor answers them with a 422.
pub async fn missed_call_handler(event: CallEvent) -> Json<ResponseRecord> {
    let call_id = Uuid::new_v4();
    info_span!("missed_call", %call_id).in_scope(|| {
        let record = select_response(&event, &mut rand::thread_rng());
        info!(
            caller = %event.caller_name,
            time_of_day = %event.time_of_day,
            action = record.action.label(),
            delay = record.simulated_delay,
            "answered missed call"
        );
        Json(record)
    })
}
