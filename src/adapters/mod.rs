//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to                 |
//! |------------|-----------------------------|-----------------------------|
//! | `hardware` | SensorPort, ActuatorPort    | Lamp/lock/sensor drivers    |
//! | `hal_pins` | DigitalOutput, DigitalInput | embedded-hal GPIO pins      |
//! | `log_sink` | EventSink                   | `log` facade                |
//! | `serial`   | Transport                   | Host serial port (bench)    |
//! | `sim`      | embedded-hal pins, sounder  | In-memory bench simulation  |
//! | `time`     | n/a                         | Monotonic millisecond clock |

pub mod hal_pins;
pub mod hardware;
pub mod log_sink;
#[cfg(feature = "bench")]
pub mod serial;
pub mod sim;
pub mod time;
