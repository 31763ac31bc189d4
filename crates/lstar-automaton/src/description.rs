use tabled::builder::Builder;

/// A renderer-friendly snapshot of a [`crate::Dfa`]: plain state ids, a transition table
/// and the accepting set, with no reference back to the automaton or its symbol type.
/// This is the only concession the DFA value makes to visualization — per spec, actual
/// rendering is an external collaborator; this type is what such a collaborator would
/// consume.
#[derive(Debug, Clone)]
pub struct DfaDescription {
    pub num_states: usize,
    pub initial_state: usize,
    pub accepting_states: Vec<usize>,
    /// `transitions[state][symbol] = target state`.
    pub transitions: Vec<Vec<usize>>,
    /// Symbol labels, in alphabet order, used only to label the rendered table.
    pub symbol_labels: Vec<String>,
}

impl DfaDescription {
    /// Builds a `tabled` grid: one row per state, one column per symbol, the initial
    /// state and accepting states marked in the leftmost column.
    pub fn to_table_string(&self) -> String {
        let mut builder = Builder::default();
        let mut header = vec!["state".to_string()];
        header.extend(self.symbol_labels.iter().cloned());
        builder.push_record(header);

        for state in 0..self.num_states {
            let mut row = vec![Self::state_label(
                state,
                state == self.initial_state,
                self.accepting_states.contains(&state),
            )];
            for target in &self.transitions[state] {
                row.push(target.to_string());
            }
            builder.push_record(row);
        }

        builder.build().to_string()
    }

    fn state_label(state: usize, is_initial: bool, is_accepting: bool) -> String {
        let mut label = state.to_string();
        if is_initial {
            label.push_str(" (→)");
        }
        if is_accepting {
            label.push_str(" *");
        }
        label
    }
}
