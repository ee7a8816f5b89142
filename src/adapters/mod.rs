//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                          |
//! |------------|--------------|--------------------------------------|
//! | `hardware` | SensorPort   | SHT3x / QMP6988 / SGP30 over I2C     |
//! |            | ServoPort    | LEDC PWM servo                       |
//! |            | AvatarPort   | Avatar face                          |
//! |            | InputPort    | Button A GPIO                        |
//! | `log_sink` | EventSink    | Serial log output                    |
//! | `time`     | —            | ESP32 system timer (monotonic ms)    |

pub mod hardware;
pub mod log_sink;
pub mod time;
