/// Hands out row ids for a single report view, starting at 0.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_strictly_increasing_ids_from_zero() {
        let mut ids = IdGenerator::new();
        let issued: Vec<u64> = (0..5).map(|_| ids.next_id()).collect();
        assert_eq!(issued, vec![0, 1, 2, 3, 4]);
        assert_eq!(ids.next_id(), 5);
    }

    #[test]
    fn generators_do_not_share_state() {
        let mut first = IdGenerator::new();
        let mut second = IdGenerator::new();
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id(), 0);
        assert_eq!(first.next_id(), 2);
    }
}
