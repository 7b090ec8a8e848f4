use std::{
    fmt::Display,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, SendError, Sender};

pub enum Act<T: Actor> {
    Continue,
    /// Wait for the next message, or handle `timeout_msg` once `timeout`
    /// passes with an empty mailbox.
    WaitOr {
        timeout: Duration,
        timeout_msg: T::Message,
    },
    Shutdown,
}

pub trait Actor: Sized {
    type Message: Send + 'static;
    type Error: Display;

    fn handle(&mut self, msg: Self::Message) -> Result<Act<Self>, Self::Error>;

    /// How the actor waits for its first message.
    fn start(&mut self) -> Act<Self> {
        Act::Continue
    }

    fn process(mut self, recv: Receiver<Self::Message>) {
        let mut act = self.start();
        loop {
            let msg = match act {
                Act::Continue => match recv.recv() {
                    Ok(msg) => msg,
                    Err(_) => {
                        break;
                    }
                },
                Act::WaitOr {
                    timeout,
                    timeout_msg,
                } => match recv.recv_timeout(timeout) {
                    Ok(msg) => msg,
                    Err(RecvTimeoutError::Timeout) => timeout_msg,
                    Err(RecvTimeoutError::Disconnected) => {
                        break;
                    }
                },
                Act::Shutdown => {
                    break;
                }
            };
            act = match self.handle(msg) {
                Ok(act) => act,
                Err(err) => {
                    log::error!("actor stopped: {}", err);
                    break;
                }
            };
        }
    }

    fn spawn<F>(cap: Capacity, name: &str, factory: F) -> ActorHandle<Self::Message>
    where
        F: FnOnce(Sender<Self::Message>) -> Self + Send + 'static,
    {
        let (send, recv) = cap.to_channel();
        let thread = thread::Builder::new().name(name.to_string()).spawn({
            let send = send.clone();
            move || factory(send).process(recv)
        });
        ActorHandle {
            sender: send,
            // Spawning only fails when the OS refuses a new thread; the
            // handle then behaves like an actor that already shut down.
            thread: thread
                .map_err(|err| log::error!("failed to spawn {}: {}", name, err))
                .ok(),
        }
    }

    fn spawn_default<F>(name: &str, factory: F) -> ActorHandle<Self::Message>
    where
        F: FnOnce(Sender<Self::Message>) -> Self + Send + 'static,
    {
        Self::spawn(Capacity::Bounded(128), name, factory)
    }
}

pub struct ActorHandle<M> {
    thread: Option<JoinHandle<()>>,
    sender: Sender<M>,
}

impl<M> ActorHandle<M> {
    pub fn send(&self, msg: M) -> Result<(), SendError<M>> {
        self.sender.send(msg)
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    pub fn join(self) {
        if let Some(thread) = self.thread {
            let _ = thread.join();
        }
    }
}

pub enum Capacity {
    Bounded(usize),
    Unbounded,
}

impl Capacity {
    pub fn to_channel<T>(&self) -> (Sender<T>, Receiver<T>) {
        match self {
            Capacity::Bounded(cap) => bounded(*cap),
            Capacity::Unbounded => unbounded(),
        }
    }
}
