//! Which todo the detail panel shows, and whether it is open.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailSelection {
    selected_id: Option<u64>,
    is_open: bool,
}

impl DetailSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self, id: u64) {
        self.selected_id = Some(id);
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.selected_id = None;
        self.is_open = false;
    }

    /// Close when `id` is already shown, otherwise show `id`. Switching from
    /// one id to another never passes through the closed state.
    pub fn toggle(&mut self, id: u64) {
        if self.is_open && self.selected_id == Some(id) {
            self.close();
        } else {
            self.open(id);
        }
    }
}
