//! Broadcast messaging for text boxes
//!
//! Text boxes can be told to refresh by a broadcast message whose body names
//! their identifier (or the `all` wildcard). Messages are queued on a
//! [`BroadcastBus`] and handed out once per tick:
//! - Immediate delivery on the next dispatch
//! - Deferred delivery at a given tick

/// A broadcast message carrying a list of addressees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    /// Tick on which the message was queued
    pub sent_tick: u64,
    addressees: Vec<String>,
}

impl Broadcast {
    /// Create a message for the given addressees
    pub fn new<I, S>(sent_tick: u64, addressees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sent_tick,
            addressees: addressees.into_iter().map(Into::into).collect(),
        }
    }

    /// Add an addressee (builder pattern)
    pub fn with_addressee(mut self, addressee: impl Into<String>) -> Self {
        self.addressees.push(addressee.into());
        self
    }

    /// Addressees of this message
    pub fn addressees(&self) -> &[String] {
        &self.addressees
    }
}

/// Message queue with immediate and tick-deferred delivery
#[derive(Debug, Default)]
pub struct BroadcastBus {
    immediate_queue: Vec<Broadcast>,
    deferred_queue: Vec<(u64, Broadcast)>,
    current_tick: u64,
}

impl BroadcastBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the current tick
    pub fn update_tick(&mut self, tick: u64) {
        self.current_tick = tick;
    }

    /// Current tick
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Queue a message for the next dispatch
    pub fn send<I, S>(&mut self, addressees: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.immediate_queue.push(Broadcast::new(self.current_tick, addressees));
    }

    /// Queue a message for delivery once the bus reaches `delivery_tick`
    pub fn post(&mut self, delivery_tick: u64, message: Broadcast) {
        self.deferred_queue.push((delivery_tick, message));
    }

    /// Take every message due on the current tick
    ///
    /// Immediate messages come first, then deferred ones in posting order.
    pub fn dispatch(&mut self) -> Vec<Broadcast> {
        let mut due = std::mem::take(&mut self.immediate_queue);

        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= self.current_tick {
                let (_, message) = self.deferred_queue.remove(i);
                due.push(message);
            } else {
                i += 1;
            }
        }

        due
    }

    /// Flatten dispatched messages into the addressee list a tick consumes
    pub fn dispatch_addressees(&mut self) -> Vec<String> {
        self.dispatch()
            .into_iter()
            .flat_map(|message| message.addressees)
            .collect()
    }

    /// Number of messages not yet delivered
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Clear all queued messages
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_dispatch() {
        let mut bus = BroadcastBus::new();
        bus.send(["score"]);
        let due = bus.dispatch();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].addressees(), ["score".to_string()]);
        assert!(bus.dispatch().is_empty());
    }

    #[test]
    fn test_deferred_dispatch() {
        let mut bus = BroadcastBus::new();
        bus.post(3, Broadcast::new(0, ["All"]));

        bus.update_tick(2);
        assert!(bus.dispatch().is_empty());
        assert_eq!(bus.pending(), 1);

        bus.update_tick(3);
        assert_eq!(bus.dispatch_addressees(), vec!["All".to_string()]);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_addressees_flattened_in_order() {
        let mut bus = BroadcastBus::new();
        bus.send(["a", "b"]);
        bus.post(0, Broadcast::new(0, ["c"]).with_addressee("d"));

        assert_eq!(bus.dispatch_addressees(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_clear() {
        let mut bus = BroadcastBus::new();
        bus.send(["a"]);
        bus.post(10, Broadcast::new(0, ["b"]));
        bus.clear();
        assert_eq!(bus.pending(), 0);
    }
}
