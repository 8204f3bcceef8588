//! Waiting passengers, one FIFO per floor. Producers append from any
//! thread while the dispatch worker peeks and pops; every floor has its
//! own lock so an append never tears a pop on the same floor.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::info;
use parking_lot::Mutex;

use shared_resources::error::DispatchError;
use shared_resources::request::{Floor, Request, RequestId};

pub struct FloorRegistry {
    floors: Vec<Mutex<VecDeque<Request>>>,
    next_id: AtomicU64,
    waiting: AtomicUsize,
    first_origin: Mutex<Option<Floor>>,
    arrival_tx: Sender<()>,
    arrival_rx: Receiver<()>,
}

impl FloorRegistry {
    pub fn new(num_floors: Floor) -> Self {
        let (arrival_tx, arrival_rx) = bounded(1);
        FloorRegistry {
            floors: (0..num_floors).map(|_| Mutex::new(VecDeque::new())).collect(),
            next_id: AtomicU64::new(1),
            waiting: AtomicUsize::new(0),
            first_origin: Mutex::new(None),
            arrival_tx,
            arrival_rx,
        }
    }

    pub fn num_floors(&self) -> Floor {
        self.floors.len() as Floor
    }

    pub fn enqueue(&self, origin: i64, destination: i64) -> Result<RequestId, DispatchError> {
        let num_floors = self.num_floors();
        let in_range = |floor: i64| (0..num_floors as i64).contains(&floor);
        if !in_range(origin) || !in_range(destination) || origin == destination {
            return Err(DispatchError::InvalidFloor {
                origin,
                destination,
                num_floors,
            });
        }
        let (origin, destination) = (origin as Floor, destination as Floor);

        let request = {
            let mut queue = self.floors[origin as usize].lock();
            // id is drawn under the floor lock so queue order matches id order
            let id = RequestId(self.next_id.fetch_add(1, Ordering::SeqCst));
            if id == RequestId(1) {
                *self.first_origin.lock() = Some(origin);
            }
            let request = Request::new(id, origin, destination);
            queue.push_back(request);
            self.waiting.fetch_add(1, Ordering::SeqCst);
            request
        };

        let _ = self.arrival_tx.try_send(());

        info!("Passenger {}", request);
        Ok(request.id)
    }

    /// Id of the head request at `floor`; `None` when empty or off the shaft.
    pub fn peek_head_priority(&self, floor: Floor) -> Option<RequestId> {
        self.floors.get(floor as usize)?.lock().front().map(|request| request.id)
    }

    pub fn pop_head(&self, floor: Floor) -> Option<Request> {
        let request = self.floors.get(floor as usize)?.lock().pop_front()?;
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        Some(request)
    }

    pub fn has_waiting(&self, floor: Floor) -> bool {
        self.peek_head_priority(floor).is_some()
    }

    pub fn waiting_at(&self, floor: Floor) -> usize {
        self.floors.get(floor as usize).map_or(0, |queue| queue.lock().len())
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.waiting_count() == 0
    }

    /// Floor and id of the oldest head across the whole shaft.
    pub fn earliest_waiting(&self) -> Option<(Floor, RequestId)> {
        (0..self.num_floors())
            .filter_map(|floor| self.peek_head_priority(floor).map(|id| (floor, id)))
            .min_by_key(|(_, id)| *id)
    }

    /// Origin of the very first request this registry accepted.
    pub fn first_origin(&self) -> Option<Floor> {
        *self.first_origin.lock()
    }

    /// Fires (at most one pending signal) whenever a request is appended.
    pub fn arrivals(&self) -> Receiver<()> {
        self.arrival_rx.clone()
    }
}
