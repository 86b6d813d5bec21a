//! Frame composition for the clock dashboard.
//!
//! [`Dashboard`] ties the ordering store, the stats mailbox, and the grid
//! solver together. Each call to [`Dashboard::compose`] takes exactly one
//! ordering snapshot and one stats snapshot, so a frame is always built from
//! a consistent view even while swaps or samples land concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::geometry::Size;
use crate::layout::{GridLayout, MAX_SECONDARY, RenderPlan};
use crate::registry::{PaneContent, PaneId, PaneLayout};
use crate::render::{cell_title, footer_lines, render_cell};
use crate::stats::StatsMailbox;
use crate::timezone::{OrderingStore, ResolvedSlot, SwapOutcome};

use super::notification::NotificationState;

pub const FOCUS_PANE: &str = "focus";
pub const FOOTER_PANE: &str = "footer";
const DEFAULT_NOTIFICATION: Duration = Duration::from_secs(3);

/// Pane id for the secondary cell showing ordering index `slot`.
pub fn slot_pane_id(slot: usize) -> PaneId {
    format!("slot{slot}")
}

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Swap focus with the given ordering index.
    Swap(usize),
    Quit,
    Ignore,
}

/// Digits `1`-`6` swap, `q`, `Esc` and `Ctrl+C` quit. Key releases are ignored.
pub fn key_action(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(ch) => match ch.to_digit(10) {
            Some(digit) if (1..=MAX_SECONDARY as u32).contains(&digit) => {
                KeyAction::Swap(digit as usize)
            }
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}

/// One pane of a composed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneFrame {
    pub id: PaneId,
    pub layout: PaneLayout,
    pub content: PaneContent,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub plan: RenderPlan,
    pub panes: Vec<PaneFrame>,
}

impl Frame {
    pub fn pane(&self, id: &str) -> Option<&PaneFrame> {
        self.panes.iter().find(|pane| pane.id == id)
    }

    pub fn layouts(&self) -> HashMap<PaneId, PaneLayout> {
        self.panes
            .iter()
            .map(|pane| (pane.id.clone(), pane.layout))
            .collect()
    }
}

pub struct Dashboard {
    ordering: Arc<OrderingStore>,
    stats: Arc<StatsMailbox>,
    layout: GridLayout,
    notifications: NotificationState,
    notification_duration: Duration,
}

impl Dashboard {
    pub fn new(ordering: Arc<OrderingStore>, stats: Arc<StatsMailbox>) -> Self {
        Self {
            ordering,
            stats,
            layout: GridLayout::new(),
            notifications: NotificationState::new(),
            notification_duration: DEFAULT_NOTIFICATION,
        }
    }

    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn ordering(&self) -> &Arc<OrderingStore> {
        &self.ordering
    }

    pub fn stats(&self) -> &Arc<StatsMailbox> {
        &self.stats
    }

    /// Solve the grid for the current ordering at `size`.
    pub fn layout(&self, size: Size) -> RenderPlan {
        let secondary = self.ordering.len().saturating_sub(1);
        self.layout.solve(size, secondary)
    }

    /// Swap focus with ordering index `index`, posting a notification on
    /// success. Invalid indices change nothing.
    pub fn swap(&mut self, index: usize, now: DateTime<Utc>) -> Option<SwapOutcome> {
        let outcome = self.ordering.swap_focus(index)?;
        self.notifications
            .show(outcome.message(), now, self.notification_duration);
        Some(outcome)
    }

    /// The notification currently shown in the footer, if any.
    pub fn notification(&mut self, now: DateTime<Utc>) -> Option<&str> {
        self.notifications.active(now)
    }

    /// Lay out and render every pane for a terminal of `size` at `now`.
    pub fn compose(&mut self, size: Size, now: DateTime<Utc>) -> Frame {
        let slots = self.ordering.snapshot();
        let stats = self.stats.latest();
        let plan = self.layout.solve(size, slots.len().saturating_sub(1));

        let mut panes = Vec::with_capacity(plan.secondaries.len() + 2);

        let focus_layout = PaneLayout::framed(plan.focus);
        panes.push(PaneFrame {
            id: FOCUS_PANE.to_string(),
            layout: focus_layout,
            content: slots
                .first()
                .map(|slot| slot_content(slot, focus_layout, None, now))
                .unwrap_or_default(),
        });

        for cell in &plan.secondaries {
            let layout = PaneLayout::framed(cell.rect);
            let content = slots
                .get(cell.slot)
                .map(|slot| slot_content(slot, layout, Some(cell.slot), now))
                .unwrap_or_default();
            panes.push(PaneFrame {
                id: slot_pane_id(cell.slot),
                layout,
                content,
            });
        }

        let notice = self.notifications.active(now).map(str::to_string);
        panes.push(PaneFrame {
            id: FOOTER_PANE.to_string(),
            layout: PaneLayout::bare(plan.footer),
            content: PaneContent::new(
                None,
                footer_lines(plan.footer.width, notice.as_deref(), &stats),
            ),
        });

        Frame { plan, panes }
    }
}

fn slot_content(
    slot: &ResolvedSlot,
    layout: PaneLayout,
    swap_key: Option<usize>,
    now: DateTime<Utc>,
) -> PaneContent {
    let Some(local) = slot.local_time(now) else {
        let title = match swap_key {
            Some(key) => format!(" [{key}] {} (unavailable) ", slot.name()),
            None => format!(" {} (unavailable) ", slot.name()),
        };
        return PaneContent::new(Some(title), Vec::new());
    };

    let area = layout.content_rect();
    let cell = render_cell(Size::new(area.width, area.height), &local);
    PaneContent::new(Some(cell_title(slot.name(), &local, swap_key)), cell.lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsSnapshot;
    use crate::timezone::TimezoneSlot;

    fn noon_utc() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn dashboard(slots: Vec<TimezoneSlot>) -> Dashboard {
        Dashboard::new(
            Arc::new(OrderingStore::new(slots)),
            Arc::new(StatsMailbox::new()),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action(&key(KeyCode::Char('3'))), KeyAction::Swap(3));
        assert_eq!(key_action(&key(KeyCode::Char('6'))), KeyAction::Swap(6));
        assert_eq!(key_action(&key(KeyCode::Char('0'))), KeyAction::Ignore);
        assert_eq!(key_action(&key(KeyCode::Char('7'))), KeyAction::Ignore);
        assert_eq!(key_action(&key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(key_action(&key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(key_action(&key(KeyCode::Char('c'))), KeyAction::Ignore);
    }

    #[test]
    fn frame_has_one_pane_per_rect() {
        let mut board = dashboard(crate::config::default_timezones());
        let frame = board.compose(Size::new(120, 40), noon_utc());
        assert_eq!(frame.panes.len(), 8);
        assert_eq!(frame.panes[0].id, FOCUS_PANE);
        assert_eq!(frame.panes[7].id, FOOTER_PANE);
        assert!(frame.pane("slot6").is_some());
        assert_eq!(frame.layouts().len(), 8);
    }

    #[test]
    fn pane_bodies_fill_their_content_area() {
        let mut board = dashboard(crate::config::default_timezones());
        let frame = board.compose(Size::new(120, 40), noon_utc());
        for pane in &frame.panes {
            let area = pane.layout.content_rect();
            assert!(pane.content.lines.len() <= area.height.max(2) as usize);
            if pane.id != FOOTER_PANE {
                assert_eq!(pane.content.lines.len(), area.height as usize);
            }
        }
    }

    #[test]
    fn titles_show_swap_keys_for_secondaries() {
        let mut board = dashboard(vec![
            TimezoneSlot::new("UTC", "UTC"),
            TimezoneSlot::new("PHL", "Asia/Manila"),
        ]);
        let frame = board.compose(Size::new(80, 30), noon_utc());
        let focus_title = frame.pane(FOCUS_PANE).unwrap().content.title.clone().unwrap();
        let slot_title = frame.pane("slot1").unwrap().content.title.clone().unwrap();
        assert_eq!(focus_title, " UTC 🌞 🟢 ");
        // 20:00 in Manila.
        assert_eq!(slot_title, " [1] PHL 🌙 🔴 ");
    }

    #[test]
    fn unresolvable_slot_renders_empty() {
        let mut board = dashboard(vec![
            TimezoneSlot::new("UTC", "UTC"),
            TimezoneSlot::new("Nowhere", "Not/AZone"),
        ]);
        let frame = board.compose(Size::new(80, 30), noon_utc());
        let pane = frame.pane("slot1").unwrap();
        assert_eq!(pane.content.title.as_deref(), Some(" [1] Nowhere (unavailable) "));
        assert!(pane.content.lines.is_empty());
    }

    #[test]
    fn empty_ordering_still_composes() {
        let mut board = Dashboard::new(
            Arc::new(OrderingStore::new(Vec::new())),
            Arc::new(StatsMailbox::new()),
        );
        let frame = board.compose(Size::new(40, 10), noon_utc());
        assert_eq!(frame.panes.len(), 2);
        assert_eq!(frame.panes[0].content, PaneContent::default());
    }

    #[test]
    fn swap_posts_notification_into_footer() {
        let mut board = dashboard(crate::config::default_timezones());
        let now = noon_utc();
        let outcome = board.swap(3, now).unwrap();
        assert_eq!(outcome.new_focus, "Philippine Time");

        let frame = board.compose(Size::new(100, 30), now);
        let footer = &frame.pane(FOOTER_PANE).unwrap().content.lines;
        assert!(footer[0].contains("Swapped UTC with Philippine Time"));

        let later = now + chrono::Duration::seconds(3);
        let frame = board.compose(Size::new(100, 30), later);
        let footer = &frame.pane(FOOTER_PANE).unwrap().content.lines;
        assert!(footer[0].contains("CPU: calculating..."));
    }

    #[test]
    fn invalid_swap_posts_nothing() {
        let mut board = dashboard(vec![
            TimezoneSlot::new("UTC", "UTC"),
            TimezoneSlot::new("PHL", "Asia/Manila"),
        ]);
        assert!(board.swap(4, noon_utc()).is_none());
        assert!(board.notification(noon_utc()).is_none());
    }

    #[test]
    fn footer_reflects_latest_stats() {
        let mut board = dashboard(crate::config::default_timezones());
        board.stats().publish(StatsSnapshot::from_usage(42.0, 3, 4));
        let frame = board.compose(Size::new(100, 30), noon_utc());
        let footer = &frame.pane(FOOTER_PANE).unwrap().content.lines;
        assert!(footer[0].contains("CPU: 42.0% | MEM: 75.0%"));
    }

    #[test]
    fn layout_tracks_ordering_length() {
        let board = dashboard(crate::config::default_timezones());
        assert_eq!(board.layout(Size::new(90, 32)).secondaries.len(), 6);
        let board = dashboard(vec![TimezoneSlot::new("UTC", "UTC")]);
        assert!(board.layout(Size::new(90, 32)).secondaries.is_empty());
    }
}
