use std::fmt;

pub type Floor = u8;

/// Arrival-order token. Ids start at 1 and only grow, so a smaller id
/// always means an earlier arrival.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub origin: Floor,
    pub destination: Floor,
}

impl Request {
    pub fn new(id: RequestId, origin: Floor, destination: Floor) -> Self {
        Request {
            id,
            origin,
            destination,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} floor {} -> floor {}", self.id, self.origin, self.destination)
    }
}
