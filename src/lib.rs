//! d1ctl - Command encoding and dispatch for the D1 servo arm
//!
//! Turns a joint-angle motion request into the controller's versioned
//! JSON command document and delivers it once over a zenoh topic. Two
//! components, composed linearly:
//!
//! - **[`ArmCommand::build`]**: pure validated builder, request in,
//!   canonical command document out.
//! - **[`CommandPublisher`]**: owns one channel bound to the command
//!   topic; serializes and transmits one document per call,
//!   fire-and-forget.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use d1ctl::{ArmCommand, Config, JointAngleRequest, TransportContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!
//!     let request = JointAngleRequest::new(vec![90.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 2.0);
//!     let command = ArmCommand::build(&request, &config.protocol)?;
//!
//!     let context = TransportContext::connect(config.transport.endpoint.as_deref()).await?;
//!     let publisher = context.command_publisher(&config.transport.topic).await?;
//!     publisher.publish(&command).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Everything downstream of the topic (wire delivery, on-robot
//! interpretation) is the transport's and the arm controller's problem;
//! this crate neither receives feedback nor plans trajectories.

pub mod command;
pub mod config;
pub mod error;
pub mod publisher;

pub use command::{ArmCommand, JointAngleRequest};
pub use config::{Config, ProtocolConfig, TransportConfig};
pub use error::{InitError, TransportError, ValidationError};
pub use publisher::{CommandPublisher, CommandSink, TransportContext};
