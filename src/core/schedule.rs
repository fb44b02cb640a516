// One-shot deferred actions keyed to a generation.
//
// The scheduler only tracks due times; whether an action is still valid when it
// comes due is decided by the controller, which compares the generation stored
// in the action against the live card/deck value.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Snap a card's spin and label back to hidden after a completed flip.
    HideLabel { card: usize, serial: u32 },
    /// End the round and regenerate the deck.
    ResetDeck { round: u32 },
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due_sec: f32,
    seq: u64,
    action: Deferred,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_sec: f32,
    next_seq: u64,
    pending: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay_sec: f32, action: Deferred) {
        let entry = Entry {
            due_sec: self.now_sec + delay_sec.max(0.0),
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.pending.push(entry);
    }

    /// Advance the clock and move every action that came due into `out`,
    /// earliest first (ties keep scheduling order).
    pub fn advance(&mut self, dt_sec: f32, out: &mut Vec<Deferred>) {
        self.now_sec += dt_sec.max(0.0);
        let now = self.now_sec;
        let mut due: Vec<Entry> = Vec::new();
        self.pending.retain(|e| {
            if e.due_sec <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_sec.total_cmp(&b.due_sec).then(a.seq.cmp(&b.seq)));
        out.extend(due.into_iter().map(|e| e.action));
    }

    /// Drop every pending action matching `pred`.
    pub fn cancel_where(&mut self, pred: impl Fn(&Deferred) -> bool) {
        self.pending.retain(|e| !pred(&e.action));
    }

    pub fn is_pending(&self, pred: impl Fn(&Deferred) -> bool) -> bool {
        self.pending.iter().any(|e| pred(&e.action))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn now_sec(&self) -> f32 {
        self.now_sec
    }
}
