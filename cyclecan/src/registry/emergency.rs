use crate::registry::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FireError {
    /// No producer is registered with the identifier
    UnknownId,
    /// The emergency buffer is full, the request is dropped
    Overflow,
}

/// Staging stack for one-shot emergency requests
///
/// Entries live until the next tick moves them into the pending list.
pub(crate) struct EmergencyBuffer<'a, const N: usize>(heapless::Vec<Endpoint<'a>, N>);

impl<'a, const N: usize> EmergencyBuffer<'a, N> {
    pub const fn new() -> Self {
        Self(heapless::Vec::new())
    }

    pub fn stage(&mut self, entry: Endpoint<'a>) -> Result<(), FireError> {
        self.0.push(entry).map_err(|_| FireError::Overflow)
    }

    /// Takes the most recently staged entry
    pub fn pop(&mut self) -> Option<Endpoint<'a>> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MessageId;
    use core::cell::Cell;

    #[test]
    fn test_overflow() {
        let buffer: [Cell<u8>; 2] = Default::default();
        let mut emergencies = EmergencyBuffer::<2>::new();
        let entry = |id| Endpoint {
            id: MessageId::new(id).unwrap(),
            data: &buffer,
        };

        assert_eq!(emergencies.stage(entry(1)), Ok(()));
        assert_eq!(emergencies.stage(entry(2)), Ok(()));
        assert_eq!(emergencies.stage(entry(3)), Err(FireError::Overflow));
        assert_eq!(emergencies.len(), 2);

        assert_eq!(emergencies.pop().map(|e| e.id.into_u16()), Some(2));
        assert_eq!(emergencies.pop().map(|e| e.id.into_u16()), Some(1));
        assert!(emergencies.pop().is_none());
    }
}
