use crate::sl::{Footprint, SlPoint};
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

#[allow(unused)]
pub fn debug_footprint(name: &str, footprint: &Footprint) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "footprint",
            "name": name,
            "s": [footprint.start_s(), footprint.end_s()],
            "l": [footprint.start_l(), footprint.end_l()],
        }))
    })
}

#[allow(unused)]
pub fn debug_point(name: &str, point: SlPoint) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "point",
            "name": name,
            "sl": [point.s, point.l],
        }))
    })
}

#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
