use super::attributes::AttributeSequence;
use super::error::{SymbolError, SymbolResult};

/// Receives every successful change of the selected attribute.
pub trait SelectionListener {
    fn selection_changed(&mut self, index: usize, attribute: &str) -> SymbolResult<()>;
}

// ---------------------------------------------------------------------------
// SequenceController – the single piece of mutable selection state
// ---------------------------------------------------------------------------

/// Current position in the attribute sequence.
///
/// Stepping wraps around the real sequence length. Each successful mutation
/// notifies the listener exactly once; a rejected `set_index` notifies nobody.
#[derive(Debug, Clone)]
pub struct SequenceController {
    attributes: AttributeSequence,
    current: usize,
}

impl SequenceController {
    pub fn new(attributes: AttributeSequence) -> Self {
        SequenceController {
            attributes,
            current: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_attribute(&self) -> &str {
        &self.attributes[self.current]
    }

    pub(crate) fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &AttributeSequence {
        &self.attributes
    }

    pub fn step_forward(&mut self, listener: &mut dyn SelectionListener) -> SymbolResult<()> {
        self.current = (self.current + 1) % self.len();
        self.notify(listener)
    }

    pub fn step_backward(&mut self, listener: &mut dyn SelectionListener) -> SymbolResult<()> {
        let len = self.len();
        self.current = (self.current + len - 1) % len;
        self.notify(listener)
    }

    /// Jump straight to `index`. Out-of-range input is rejected, not wrapped.
    pub fn set_index(
        &mut self,
        index: i64,
        listener: &mut dyn SelectionListener,
    ) -> SymbolResult<()> {
        let len = self.len();
        let valid = usize::try_from(index).ok().filter(|&i| i < len);
        let Some(index) = valid else {
            return Err(SymbolError::OutOfRange { index, len });
        };
        self.current = index;
        self.notify(listener)
    }

    fn notify(&self, listener: &mut dyn SelectionListener) -> SymbolResult<()> {
        listener.selection_changed(self.current, self.current_attribute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(usize, String)>,
    }

    impl SelectionListener for Recorder {
        fn selection_changed(&mut self, index: usize, attribute: &str) -> SymbolResult<()> {
            self.calls.push((index, attribute.to_string()));
            Ok(())
        }
    }

    fn controller(len: usize) -> SequenceController {
        let names: Vec<String> = (0..len).map(|i| format!("{}", 1990 + i)).collect();
        SequenceController::new(AttributeSequence::try_from(names).unwrap())
    }

    #[test]
    fn backward_from_start_wraps_to_last() {
        let mut seq = controller(5);
        let mut rec = Recorder::default();
        seq.step_backward(&mut rec).unwrap();
        assert_eq!(seq.current_index(), 4);
        assert_eq!(seq.current_attribute(), "1994");
    }

    #[test]
    fn forward_from_last_wraps_to_start() {
        let mut seq = controller(5);
        let mut rec = Recorder::default();
        seq.set_index(4, &mut rec).unwrap();
        seq.step_forward(&mut rec).unwrap();
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn wrap_bound_follows_sequence_length() {
        // 40 attributes: stepping past index 35 must not wrap early.
        let mut seq = controller(40);
        let mut rec = Recorder::default();
        seq.set_index(35, &mut rec).unwrap();
        seq.step_forward(&mut rec).unwrap();
        assert_eq!(seq.current_index(), 36);
    }

    #[test]
    fn forward_then_backward_round_trips_for_every_index() {
        for len in 1..=6 {
            let mut seq = controller(len);
            let mut rec = Recorder::default();
            for start in 0..len {
                seq.set_index(start as i64, &mut rec).unwrap();
                seq.step_forward(&mut rec).unwrap();
                seq.step_backward(&mut rec).unwrap();
                assert_eq!(seq.current_index(), start, "len {len}, start {start}");
            }
        }
    }

    #[test]
    fn single_attribute_sequence_stays_put() {
        let mut seq = controller(1);
        let mut rec = Recorder::default();
        seq.step_forward(&mut rec).unwrap();
        seq.step_backward(&mut rec).unwrap();
        assert_eq!(seq.current_index(), 0);
        assert_eq!(rec.calls.len(), 2);
    }

    #[test]
    fn set_index_rejects_out_of_range() {
        let mut seq = controller(3);
        let mut rec = Recorder::default();
        assert_eq!(
            seq.set_index(-1, &mut rec),
            Err(SymbolError::OutOfRange { index: -1, len: 3 })
        );
        assert_eq!(
            seq.set_index(3, &mut rec),
            Err(SymbolError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(seq.current_index(), 0);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn each_mutation_notifies_once() {
        let mut seq = controller(3);
        let mut rec = Recorder::default();
        seq.set_index(2, &mut rec).unwrap();
        assert_eq!(rec.calls, vec![(2, "1992".to_string())]);
        assert_eq!(seq.current_attribute(), "1992");

        seq.step_forward(&mut rec).unwrap();
        seq.step_backward(&mut rec).unwrap();
        assert_eq!(rec.calls.len(), 3);
        assert_eq!(rec.calls[1], (0, "1990".to_string()));
        assert_eq!(rec.calls[2], (2, "1992".to_string()));
    }
}
