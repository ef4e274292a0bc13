/// Identifies a single node within one compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A source of node ids for one compilation unit.
///
/// Every id issued is strictly greater than all the ids issued before it.
pub trait IdGenerator {
    fn gen_id(&mut self) -> NodeId;
}

#[derive(Debug, Default, Clone)]
pub struct IncrementingIdGenerator {
    next: u32,
}

impl IncrementingIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(seed: u32) -> Self {
        Self { next: seed }
    }
}

impl IdGenerator for IncrementingIdGenerator {
    fn gen_id(&mut self) -> NodeId {
        let id = self.next;
        self.next = id.checked_add(1).expect("node id space exhausted");
        NodeId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut ids = IncrementingIdGenerator::starting_at(7);
        let issued = (0..5).map(|_| ids.gen_id()).collect::<Vec<_>>();

        assert_eq!(issued.first(), Some(&NodeId::new(7)));
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    #[should_panic(expected = "node id space exhausted")]
    fn exhausting_the_id_space_panics() {
        let mut ids = IncrementingIdGenerator::starting_at(u32::MAX);
        ids.gen_id();
    }
}
