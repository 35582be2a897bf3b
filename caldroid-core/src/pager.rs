//! Infinite month pager backed by four recycled slots.
//!
//! The host pager exposes a very large page space starting at
//! [`INITIAL_PAGE`]. Every virtual page maps onto one of [`SLOT_COUNT`]
//! slots (`page mod 4`), and the slots around the current page are kept
//! holding the previous, current and next month. The fourth slot is the
//! spare and is only rebuilt once the pager gets next to it.

use log::debug;

use crate::date::{MonthKey, WeekStart};
use crate::error::{CaldroidError, CaldroidResult};
use crate::grid::{DateGrid, GridConfiguration, build_grid};

pub const SLOT_COUNT: usize = 4;

/// Virtual page the pager starts on.
pub const INITIAL_PAGE: i64 = 1000;

// Month offsets, relative to the current page, of the slots to rebuild
const NEIGHBOURS: &[i32] = &[-1, 0, 1];
const FAR_NEXT: &[i32] = &[1];
const FAR_PREVIOUS: &[i32] = &[-1];
const ALL_SLOTS: &[i32] = &[-1, 0, 1, 2];

/// Recycled slot backing `virtual_page`.
pub fn slot_for(virtual_page: i64) -> usize {
    virtual_page.rem_euclid(SLOT_COUNT as i64) as usize
}

/// Month offset a slot should hold relative to the current page.
fn slot_offset(slot: usize, current_page: i64) -> i32 {
    match (slot as i64 - current_page).rem_euclid(SLOT_COUNT as i64) {
        3 => -1,
        d => d as i32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Holds a month other than the one its position calls for.
    Stale,
    Fresh,
}

#[derive(Debug, Clone)]
pub struct Slot {
    month: MonthKey,
    grid: DateGrid,
    status: SlotStatus,
}

impl Slot {
    fn build(
        month: MonthKey,
        week_start: WeekStart,
        pad_to_six_rows: bool,
    ) -> CaldroidResult<Self> {
        let config = GridConfiguration::for_month(month, week_start, pad_to_six_rows);

        Ok(Slot {
            month,
            grid: build_grid(&config)?,
            status: SlotStatus::Fresh,
        })
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    pub fn grid(&self) -> &DateGrid {
        &self.grid
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn is_fresh(&self) -> bool {
        self.status == SlotStatus::Fresh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Stay,
    Forward,
    Backward,
}

/// Outcome of a page transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChange {
    pub page: i64,
    pub month: MonthKey,
    /// Pages moved; also the number of months moved.
    pub delta: i64,
    /// Slots whose grid was rebuilt, in rebuild order.
    pub rebuilt: Vec<usize>,
}

impl PageChange {
    pub fn direction(&self) -> PageDirection {
        match self.delta {
            0 => PageDirection::Stay,
            d if d > 0 => PageDirection::Forward,
            _ => PageDirection::Backward,
        }
    }

    pub fn month_changed(&self) -> bool {
        self.delta != 0
    }
}

/// Current page, current month and the slot arena.
#[derive(Debug, Clone)]
pub struct PagerState {
    current_page: i64,
    current_month: MonthKey,
    week_start: WeekStart,
    pad_to_six_rows: bool,
    slots: Vec<Slot>,
}

impl PagerState {
    pub fn new(
        month: MonthKey,
        week_start: WeekStart,
        pad_to_six_rows: bool,
    ) -> CaldroidResult<Self> {
        let current_page = INITIAL_PAGE;

        let slots = (0..SLOT_COUNT)
            .map(|slot| {
                let month = month.offset(slot_offset(slot, current_page))?;
                Slot::build(month, week_start, pad_to_six_rows)
            })
            .collect::<CaldroidResult<Vec<_>>>()?;

        Ok(PagerState {
            current_page,
            current_month: month,
            week_start,
            pad_to_six_rows,
            slots,
        })
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    /// Virtual page `step` pages away from the current one.
    pub fn page_after(&self, step: i64) -> CaldroidResult<i64> {
        self.current_page.checked_add(step).ok_or_else(|| {
            CaldroidError::InvalidArgument(format!(
                "page {} has no page {step} steps away",
                self.current_page
            ))
        })
    }

    pub fn current_month(&self) -> MonthKey {
        self.current_month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn pad_to_six_rows(&self) -> bool {
        self.pad_to_six_rows
    }

    pub fn current_slot(&self) -> usize {
        slot_for(self.current_page)
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn current_grid(&self) -> &DateGrid {
        &self.slots[self.current_slot()].grid
    }

    /// Grid backing `virtual_page`, whatever month it currently holds.
    pub fn grid_for_page(&self, virtual_page: i64) -> &DateGrid {
        &self.slots[slot_for(virtual_page)].grid
    }

    /// Handle the host pager settling on `virtual_page`.
    ///
    /// Selecting the current page again refreshes the current slot and its
    /// neighbours. A single step forward or back moves the month by one and
    /// rebuilds the slot that becomes the new far neighbour. Larger jumps
    /// move the month by the full page delta and rebuild all three visible
    /// slots.
    pub fn on_page_selected(&mut self, virtual_page: i64) -> CaldroidResult<PageChange> {
        let delta = virtual_page.checked_sub(self.current_page).ok_or_else(|| {
            CaldroidError::InvalidArgument(format!(
                "page {virtual_page} is too far from page {}",
                self.current_page
            ))
        })?;

        let (month, offsets) = match delta {
            0 => (self.current_month, NEIGHBOURS),
            1 => (self.current_month.succ()?, FAR_NEXT),
            -1 => (self.current_month.pred()?, FAR_PREVIOUS),
            _ => {
                let months = i32::try_from(delta).map_err(|_| {
                    CaldroidError::InvalidArgument(format!("page jump of {delta} is too large"))
                })?;
                (self.current_month.offset(months)?, NEIGHBOURS)
            }
        };

        let rebuilt = self.rebuild_around(virtual_page, month, offsets)?;

        self.current_page = virtual_page;
        self.current_month = month;
        self.mark_stale_slots();

        debug!(
            "page {} selected (delta {}): month {}, rebuilt slots {:?}",
            virtual_page, delta, month, rebuilt
        );

        Ok(PageChange {
            page: virtual_page,
            month,
            delta,
            rebuilt,
        })
    }

    /// Refresh the visible slots without moving.
    pub fn refresh(&mut self) -> CaldroidResult<PageChange> {
        self.on_page_selected(self.current_page)
    }

    /// Jump to `target` with a single simulated swipe.
    ///
    /// The pager is reseeded one month short of the target and then moved
    /// one page toward it, so the host animates one page no matter how far
    /// away the target is. Returns `None` when `target` is already shown.
    pub fn move_to(&mut self, target: MonthKey) -> CaldroidResult<Option<PageChange>> {
        let months = self.current_month.months_until(target);
        if months == 0 {
            return Ok(None);
        }

        let step: i32 = months.signum();
        let seed = target.offset(-step)?;

        debug!("moving from {} to {} via {}", self.current_month, target, seed);

        let page = self.page_after(i64::from(step))?;
        self.reseed(seed)?;
        self.on_page_selected(page).map(Some)
    }

    /// Show `month` on the current page without a swipe. Every slot is
    /// rebuilt.
    pub fn reseed(&mut self, month: MonthKey) -> CaldroidResult<()> {
        let rebuilt = self.rebuild_around(self.current_page, month, ALL_SLOTS)?;
        self.current_month = month;
        self.mark_stale_slots();

        debug!("reseeded page {} with {}, rebuilt slots {:?}", self.current_page, month, rebuilt);
        Ok(())
    }

    /// Change grid settings; every slot is rebuilt.
    pub fn set_grid_settings(
        &mut self,
        week_start: WeekStart,
        pad_to_six_rows: bool,
    ) -> CaldroidResult<()> {
        let previous = (self.week_start, self.pad_to_six_rows);
        self.week_start = week_start;
        self.pad_to_six_rows = pad_to_six_rows;

        if let Err(e) = self.reseed(self.current_month) {
            (self.week_start, self.pad_to_six_rows) = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Rebuild the slots at `offsets` around `page` for `month`. Nothing is
    /// written unless every grid builds.
    fn rebuild_around(
        &mut self,
        page: i64,
        month: MonthKey,
        offsets: &[i32],
    ) -> CaldroidResult<Vec<usize>> {
        let built = offsets
            .iter()
            .map(|&offset| -> CaldroidResult<(usize, Slot)> {
                let slot = slot_for(page + i64::from(offset));
                let slot_month = month.offset(offset)?;
                Ok((slot, Slot::build(slot_month, self.week_start, self.pad_to_six_rows)?))
            })
            .collect::<CaldroidResult<Vec<_>>>()?;

        Ok(built
            .into_iter()
            .map(|(index, slot)| {
                self.slots[index] = slot;
                index
            })
            .collect())
    }

    fn mark_stale_slots(&mut self) {
        let current_page = self.current_page;
        let current_month = self.current_month;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let expected = current_month.offset(slot_offset(index, current_page)).ok();
            slot.status = if expected == Some(slot.month) {
                SlotStatus::Fresh
            } else {
                SlotStatus::Stale
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    fn pager(y: i32, m: u32) -> PagerState {
        PagerState::new(month(y, m), WeekStart::SUNDAY, true).unwrap()
    }

    fn visible_months(p: &PagerState) -> [MonthKey; 3] {
        let page = p.current_page();
        [
            p.grid_for_page(page - 1).month(),
            p.grid_for_page(page).month(),
            p.grid_for_page(page + 1).month(),
        ]
    }

    #[test]
    fn test_slot_for_cycles_with_period_four() {
        for v in -10..10 {
            assert_eq!(slot_for(v), slot_for(v + 4));
            assert!(slot_for(v) < SLOT_COUNT);
        }
        assert_eq!(slot_for(-1), 3);
        assert_eq!(slot_for(INITIAL_PAGE), 0);
    }

    #[test]
    fn test_initial_slots_hold_previous_current_next_and_spare() {
        let p = pager(2024, 3);

        assert_eq!(p.current_page(), INITIAL_PAGE);
        assert_eq!(p.slot(0).unwrap().month(), month(2024, 3));
        assert_eq!(p.slot(1).unwrap().month(), month(2024, 4));
        assert_eq!(p.slot(2).unwrap().month(), month(2024, 5));
        assert_eq!(p.slot(3).unwrap().month(), month(2024, 2));
        assert!(p.slots().iter().all(Slot::is_fresh));
        assert_eq!(p.current_grid().month(), month(2024, 3));
    }

    #[test]
    fn test_forward_swipe_advances_one_month() {
        let mut p = pager(2024, 12);

        let change = p.on_page_selected(INITIAL_PAGE + 1).unwrap();

        assert_eq!(change.month, month(2025, 1));
        assert_eq!(change.direction(), PageDirection::Forward);
        assert_eq!(change.rebuilt, vec![slot_for(INITIAL_PAGE + 2)]);
        assert_eq!(visible_months(&p), [month(2024, 12), month(2025, 1), month(2025, 2)]);

        // old previous-month slot is now the spare
        let spare = p.slot(slot_for(INITIAL_PAGE + 3)).unwrap();
        assert_eq!(spare.month(), month(2024, 11));
        assert_eq!(spare.status(), SlotStatus::Stale);
    }

    #[test]
    fn test_backward_swipe_retreats_one_month() {
        let mut p = pager(2024, 1);

        let change = p.on_page_selected(INITIAL_PAGE - 1).unwrap();

        assert_eq!(change.month, month(2023, 12));
        assert_eq!(change.direction(), PageDirection::Backward);
        assert_eq!(change.rebuilt, vec![slot_for(INITIAL_PAGE - 2)]);
        assert_eq!(visible_months(&p), [month(2023, 11), month(2023, 12), month(2024, 1)]);
    }

    #[test]
    fn test_forward_then_back_round_trips() {
        let mut p = pager(2024, 3);

        p.on_page_selected(INITIAL_PAGE + 1).unwrap();
        p.on_page_selected(INITIAL_PAGE).unwrap();

        assert_eq!(p.current_month(), month(2024, 3));
        assert_eq!(visible_months(&p), [month(2024, 2), month(2024, 3), month(2024, 4)]);
    }

    #[test]
    fn test_long_swipe_sequence_keeps_visible_slots_fresh() {
        let mut p = pager(2024, 6);
        let mut page = INITIAL_PAGE;

        for _ in 0..15 {
            page += 1;
            p.on_page_selected(page).unwrap();
        }
        assert_eq!(p.current_month(), month(2025, 9));

        for _ in 0..20 {
            page -= 1;
            p.on_page_selected(page).unwrap();
            for offset in [-1, 0, 1] {
                assert!(p.slot(slot_for(page + offset)).unwrap().is_fresh());
            }
        }
        assert_eq!(p.current_month(), month(2024, 1));
    }

    #[test]
    fn test_same_page_refreshes_without_moving() {
        let mut p = pager(2024, 3);

        let change = p.on_page_selected(INITIAL_PAGE).unwrap();

        assert_eq!(change.direction(), PageDirection::Stay);
        assert!(!change.month_changed());
        assert_eq!(change.rebuilt.len(), 3);
        assert_eq!(p.current_month(), month(2024, 3));
    }

    #[test]
    fn test_multi_page_jump_moves_by_full_delta() {
        let mut p = pager(2024, 3);

        let change = p.on_page_selected(INITIAL_PAGE + 3).unwrap();

        assert_eq!(change.month, month(2024, 6));
        assert_eq!(change.delta, 3);
        assert_eq!(visible_months(&p), [month(2024, 5), month(2024, 6), month(2024, 7)]);
    }

    #[test]
    fn test_move_to_same_month_is_noop() {
        let mut p = pager(2024, 3);
        let before = p.slots().to_vec();

        assert_eq!(p.move_to(month(2024, 3)).unwrap(), None);
        assert_eq!(p.current_month(), month(2024, 3));
        assert_eq!(p.current_page(), INITIAL_PAGE);
        assert!(
            before
                .iter()
                .zip(p.slots())
                .all(|(a, b)| a.month() == b.month() && a.grid() == b.grid())
        );
    }

    #[test]
    fn test_move_to_distant_month_takes_one_swipe() {
        let mut p = pager(2024, 3);

        let change = p.move_to(month(2026, 10)).unwrap().unwrap();
        assert_eq!(change.delta, 1);
        assert_eq!(change.page, INITIAL_PAGE + 1);
        assert_eq!(p.current_month(), month(2026, 10));
        assert_eq!(visible_months(&p), [month(2026, 9), month(2026, 10), month(2026, 11)]);

        let change = p.move_to(month(2020, 1)).unwrap().unwrap();
        assert_eq!(change.delta, -1);
        assert_eq!(change.page, INITIAL_PAGE);
        assert_eq!(p.current_month(), month(2020, 1));
        assert_eq!(visible_months(&p), [month(2019, 12), month(2020, 1), month(2020, 2)]);
    }

    #[test]
    fn test_set_grid_settings_rebuilds_every_slot() {
        let mut p = pager(2024, 1);
        p.on_page_selected(INITIAL_PAGE + 1).unwrap();

        p.set_grid_settings(WeekStart::MONDAY, false).unwrap();

        assert!(p.slots().iter().all(Slot::is_fresh));
        assert!(
            p.slots()
                .iter()
                .all(|s| s.grid().week_start() == WeekStart::MONDAY)
        );
        assert_eq!(p.current_grid().len(), 35);
    }

    #[test]
    fn test_extreme_pages_are_rejected() {
        let mut p = pager(2024, 3);

        assert!(matches!(p.on_page_selected(i64::MIN), Err(CaldroidError::InvalidArgument(_))));
        assert!(matches!(p.on_page_selected(i64::MAX), Err(CaldroidError::InvalidArgument(_))));
        assert_eq!(p.current_page(), INITIAL_PAGE);
        assert_eq!(p.current_month(), month(2024, 3));

        assert!(matches!(p.page_after(i64::MAX), Err(CaldroidError::InvalidArgument(_))));
        assert_eq!(p.page_after(-1).unwrap(), INITIAL_PAGE - 1);
    }

    #[test]
    fn test_move_to_adjacent_month_matches_swipe() {
        let mut swiped = pager(2024, 3);
        let swipe = swiped.on_page_selected(INITIAL_PAGE + 1).unwrap();

        let mut moved = pager(2024, 3);
        let change = moved.move_to(month(2024, 4)).unwrap().unwrap();

        assert_eq!(change.page, swipe.page);
        assert_eq!(change.month, swipe.month);
        assert_eq!(change.delta, 1);
        assert_eq!(visible_months(&moved), visible_months(&swiped));
        assert_eq!(moved.current_grid(), swiped.current_grid());
    }
}
