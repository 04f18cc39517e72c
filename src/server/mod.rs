//! TCP acceptor: one spawned connection task per accepted socket.

pub mod listener;
