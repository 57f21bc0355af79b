//! Output surfaces
//!
//! The controller never renders directly. It pushes text to a
//! `DisplaySurface` (the running timer) and notifies a `HistoryView` (the
//! completed lap list) through `LapHistoryPresenter`.

use crate::laps::CompletedLap;

/// The primary text surface showing the current lap
pub trait DisplaySurface {
    fn show(&mut self, text: &str);
}

/// Scrollable list of completed laps, newest at index 0
pub trait HistoryView {
    /// A row was inserted at `index`
    fn item_inserted(&mut self, index: usize, label: &str);

    fn scroll_to_top(&mut self);
}

/// Forwards each completed lap to the history view as a new top row
pub struct LapHistoryPresenter {
    view: Box<dyn HistoryView>,
}

impl LapHistoryPresenter {
    pub fn new(view: Box<dyn HistoryView>) -> Self {
        Self { view }
    }

    pub fn lap_completed(&mut self, lap: &CompletedLap) {
        self.view.item_inserted(0, lap.label());
        self.view.scroll_to_top();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct RecordingView {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl HistoryView for RecordingView {
        fn item_inserted(&mut self, index: usize, label: &str) {
            self.events.borrow_mut().push(format!("insert {index} {label}"));
        }

        fn scroll_to_top(&mut self) {
            self.events.borrow_mut().push("top".to_string());
        }
    }

    #[test]
    fn completed_lap_is_inserted_at_top_then_scrolled() {
        let view = RecordingView::default();
        let events = Rc::clone(&view.events);
        let mut presenter = LapHistoryPresenter::new(Box::new(view));

        presenter.lap_completed(&CompletedLap::new(3, 61_234));

        assert_eq!(
            *events.borrow(),
            vec!["insert 0 [Lap 3] 1:01.234".to_string(), "top".to_string()]
        );
    }
}
