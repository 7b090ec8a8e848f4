//! Featured-course rotation.
//!
//! [`Carousel`] is the plain index arithmetic.  [`CarouselTicker`] drives it
//! from a background thread, advancing on a fixed interval until it is
//! stopped or dropped.

use std::{convert::Infallible, time::Duration};

use crossbeam_channel::{Receiver, Sender};

use crate::actor::{Act, Actor, ActorHandle, Capacity};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Change the number of slides, keeping the index in range.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CarouselEvent {
    Rotated { index: usize },
}

pub enum CarouselMsg {
    Advance,
    Previous,
    Resize(usize),
    Shutdown,
}

struct Rotation {
    carousel: Carousel,
    interval: Duration,
    event_send: Sender<CarouselEvent>,
}

impl Rotation {
    fn wait(&self) -> Act<Self> {
        Act::WaitOr {
            timeout: self.interval,
            timeout_msg: CarouselMsg::Advance,
        }
    }

    fn publish(&self) -> Act<Self> {
        let event = CarouselEvent::Rotated {
            index: self.carousel.index(),
        };
        if self.event_send.send(event).is_err() {
            log::debug!("carousel listener is gone, stopping");
            return Act::Shutdown;
        }
        self.wait()
    }
}

impl Actor for Rotation {
    type Message = CarouselMsg;
    type Error = Infallible;

    fn start(&mut self) -> Act<Self> {
        self.wait()
    }

    fn handle(&mut self, msg: Self::Message) -> Result<Act<Self>, Self::Error> {
        match msg {
            CarouselMsg::Advance => {
                self.carousel.next();
                Ok(self.publish())
            }
            CarouselMsg::Previous => {
                self.carousel.previous();
                Ok(self.publish())
            }
            CarouselMsg::Resize(len) => {
                self.carousel.resize(len);
                Ok(self.publish())
            }
            CarouselMsg::Shutdown => {
                log::debug!("stopping carousel");
                Ok(Act::Shutdown)
            }
        }
    }
}

/// Background rotation of a carousel.  The ticker thread is shut down and
/// joined when the ticker is stopped or dropped.
pub struct CarouselTicker {
    actor: Option<ActorHandle<CarouselMsg>>,
}

impl CarouselTicker {
    /// Intervals shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn spawn(len: usize, interval: Duration) -> (Self, Receiver<CarouselEvent>) {
        let interval = interval.max(MIN_INTERVAL);
        let (event_send, event_recv) = Capacity::Unbounded.to_channel();
        let actor = Rotation::spawn_default("carousel", move |_| Rotation {
            carousel: Carousel::new(len),
            interval,
            event_send,
        });
        (Self { actor: Some(actor) }, event_recv)
    }

    pub fn advance(&self) {
        self.send(CarouselMsg::Advance);
    }

    pub fn previous(&self) {
        self.send(CarouselMsg::Previous);
    }

    pub fn resize(&self, len: usize) {
        self.send(CarouselMsg::Resize(len));
    }

    pub fn is_running(&self) -> bool {
        self.actor.as_ref().is_some_and(ActorHandle::is_running)
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn send(&self, msg: CarouselMsg) {
        if let Some(actor) = &self.actor {
            if actor.send(msg).is_err() {
                log::warn!("carousel is not running");
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(actor) = self.actor.take() {
            let _ = actor.send(CarouselMsg::Shutdown);
            actor.join();
        }
    }
}

impl Drop for CarouselTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
