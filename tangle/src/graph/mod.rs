//! Graph construction and execution.
//!
//! A [`StateGraph`] is built from nodes, plain edges, and conditional edges,
//! then compiled into a [`CompiledStateGraph`] that can be invoked or
//! streamed. Nodes pause execution by returning an [`Interrupt`] through
//! [`GraphInterrupt`]; the run loop checkpoints the pre-node state so the
//! run can be resumed later.

mod compile_error;
mod compiled;
mod conditional;
mod interrupt;
pub mod logging;
mod next;
mod node;
mod state_graph;
mod visualization;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use interrupt::{GraphInterrupt, Interrupt};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
pub use visualization::{generate_dot, generate_text};
