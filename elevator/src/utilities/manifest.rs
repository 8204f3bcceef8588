use shared_resources::request::{Floor, Request, RequestId};

/// Passengers on board, bucketed by destination. Each bucket is kept
/// sorted by ascending id.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct Manifest {
    buckets: Vec<Vec<Request>>,
}

impl Manifest {
    pub fn new(num_floors: Floor) -> Self {
        Manifest {
            buckets: vec![Vec::new(); num_floors as usize],
        }
    }

    pub fn board(&mut self, request: Request) {
        let bucket = &mut self.buckets[request.destination as usize];
        let position = bucket.partition_point(|onboard| onboard.id < request.id);
        bucket.insert(position, request);
    }

    /// Empties the whole bucket for `floor` at once.
    pub fn take_bucket(&mut self, floor: Floor) -> Vec<Request> {
        self.buckets
            .get_mut(floor as usize)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn head_priority(&self, floor: Floor) -> Option<RequestId> {
        self.buckets.get(floor as usize)?.first().map(|request| request.id)
    }

    pub fn has_bucket(&self, floor: Floor) -> bool {
        self.head_priority(floor).is_some()
    }

    pub fn bucket_len(&self, floor: Floor) -> usize {
        self.buckets.get(floor as usize).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Destination of the earliest boarder still on board.
    pub fn earliest(&self) -> Option<(Floor, RequestId)> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(floor, bucket)| bucket.first().map(|request| (floor as Floor, request.id)))
            .min_by_key(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: u64, origin: Floor, destination: Floor) -> Request {
        Request::new(RequestId(id), origin, destination)
    }

    #[test]
    fn buckets_stay_sorted_by_id() {
        let mut manifest = Manifest::new(6);
        manifest.board(request(7, 0, 4));
        manifest.board(request(2, 1, 4));
        manifest.board(request(5, 3, 4));

        let ids: Vec<u64> = manifest.take_bucket(4).iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 5, 7]);
        assert!(manifest.is_empty());
    }

    #[test]
    fn take_bucket_leaves_other_destinations() {
        let mut manifest = Manifest::new(6);
        manifest.board(request(1, 0, 5));
        manifest.board(request(2, 0, 3));
        manifest.board(request(3, 0, 3));

        assert_eq!(manifest.take_bucket(3).len(), 2);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.bucket_len(5), 1);
        assert!(manifest.take_bucket(3).is_empty());
        assert!(manifest.take_bucket(42).is_empty());
    }

    #[test]
    fn earliest_finds_lowest_id_across_buckets() {
        let mut manifest = Manifest::new(6);
        assert_eq!(manifest.earliest(), None);
        manifest.board(request(9, 0, 1));
        manifest.board(request(4, 2, 5));
        manifest.board(request(6, 2, 1));

        assert_eq!(manifest.earliest(), Some((5, RequestId(4))));
        assert_eq!(manifest.head_priority(1), Some(RequestId(6)));
        assert_eq!(manifest.head_priority(0), None);
        assert_eq!(manifest.head_priority(99), None);
    }
}
