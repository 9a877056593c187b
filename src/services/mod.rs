// navprobe services
// Services provide the harness behavior on top of the managers: rendering
// the log and wiring navigation events into the store.

pub mod log_renderer;
pub mod navigation_probe;
