use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_i64(&mut self, start: i64, end_inclusive: i64) -> i64 {
        debug_assert!(start <= end_inclusive);
        let span = (end_inclusive - start) as u64 + 1;
        start + (self.next_u64() % span) as i64
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as u32
    }
}

#[derive(Debug, Default)]
struct Card {
    id: usize,
    index: Option<usize>,
    measured: (u32, u32),
    top: i64,
    width: u32,
    height: u32,
    recycled: usize,
}

impl Visual for Card {
    fn measure(&mut self, width: u32, height: u32) {
        self.measured = (width, height);
    }

    fn place(&mut self, top: i64, width: u32, height: u32) {
        self.top = top;
        self.width = width;
        self.height = height;
    }

    fn recycle(&mut self) {
        self.index = None;
        self.recycled += 1;
    }
}

#[derive(Debug, Default)]
struct Cards {
    count: usize,
    next_id: usize,
    // (index, was_recycled)
    renders: Vec<(usize, bool)>,
}

impl Cards {
    fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }
}

impl ItemSource for Cards {
    type Visual = Card;

    fn count(&self) -> usize {
        self.count
    }

    fn render_item(&mut self, index: usize, recycled: Option<Card>) -> Card {
        self.renders.push((index, recycled.is_some()));
        let mut card = recycled.unwrap_or_else(|| {
            let id = self.next_id;
            self.next_id += 1;
            Card {
                id,
                ..Card::default()
            }
        });
        card.index = Some(index);
        card
    }
}

#[derive(Debug, Default)]
struct Recorder {
    ends: usize,
    indexes: Vec<usize>,
    ratios: Vec<(usize, f32)>,
}

impl ListListener<Card> for Recorder {
    fn on_end_of_list_reached(&mut self) {
        self.ends += 1;
    }

    fn on_item_ratio_changed(&mut self, visual: &Card, ratio: f32) {
        self.ratios.push((visual.index.unwrap(), ratio));
    }

    fn on_item_index_changed(&mut self, index: usize) {
        self.indexes.push(index);
    }
}

// 1050 / 1.75 = 600 px cards over 300 px rows in a 1200 px tall viewport.
fn phone() -> ExpandListOptions {
    ExpandListOptions::new().with_initial_rect(Some(Rect::new(1050, 1200)))
}

fn phone_state(count: usize) -> ViewportState {
    ViewportState::new(1050, 1200, count, 300, 1.75)
}

fn metrics(list: &ExpandList<Card>) -> Vec<SlotMetrics> {
    let mut out = Vec::new();
    list.for_each_slot_metrics(|m| out.push(m));
    out
}

#[test]
fn content_height_and_max_offset() {
    let vp = phone_state(100);
    assert_eq!(vp.card_max_height(), 600);
    assert_eq!(vp.content_height(), 99 * 300 + 1200);
    assert_eq!(vp.max_scroll_offset(), 99 * 300);

    let single = phone_state(1);
    assert_eq!(single.content_height(), 1200);
    assert_eq!(single.max_scroll_offset(), 0);

    let empty = phone_state(0);
    assert_eq!(empty.content_height(), 1200);
    assert_eq!(empty.max_scroll_offset(), 0);
    assert!(empty.visible_range(0, 1200).is_empty());
}

#[test]
fn visible_range_covers_elastic_pair_and_rows() {
    let vp = phone_state(100);
    assert_eq!(
        vp.visible_range(0, 1200),
        VisibleRange {
            start_index: 0,
            end_index: 3
        }
    );
    // Halfway through row 1: 450 + 450 + 300 + 300 covers the viewport.
    assert_eq!(
        vp.visible_range(450, 1200),
        VisibleRange {
            start_index: 1,
            end_index: 5
        }
    );
}

#[test]
fn visible_range_clamps_overscrolled_offsets() {
    let vp = phone_state(100);
    assert_eq!(vp.visible_range(-500, 1200), vp.visible_range(0, 1200));
    assert_eq!(
        vp.visible_range(1_000_000, 1200),
        VisibleRange {
            start_index: 99,
            end_index: 100
        }
    );
}

#[test]
fn visible_range_is_bounded_deep_in_the_list() {
    let vp = phone_state(100_000);
    let shallow = vp.visible_range(450, 1200);
    let deep = vp.visible_range(90_000 * 300 + 150, 1200);
    assert_eq!(shallow.len(), deep.len());
}

#[test]
fn slot_heights_interpolate_between_card_and_row() {
    let vp = phone_state(100);
    assert_eq!(vp.slot_height(1, 1, 300), (600, 1.0));
    assert_eq!(vp.slot_height(2, 1, 300), (300, 0.0));

    assert_eq!(vp.slot_height(1, 1, 450), (450, 0.5));
    assert_eq!(vp.slot_height(2, 1, 450), (450, 0.5));
    assert_eq!(vp.slot_height(3, 1, 450), (300, 0.0));
}

#[test]
fn card_equal_to_row_height_does_not_divide_by_zero() {
    // 525 / 1.75 = 300 = min_row_height
    let vp = ViewportState::new(525, 1200, 10, 300, 1.75);
    assert_eq!(vp.card_max_height(), 300);
    let (height, ratio) = vp.slot_height(1, 0, 150);
    assert_eq!(height, 300);
    assert_eq!(ratio, 0.0);
}

#[test]
fn elastic_ratio_decreases_monotonically_across_a_row() {
    let vp = phone_state(100);
    let mut prev_ratio = f32::INFINITY;
    let mut prev_height = u32::MAX;
    for offset in (300..=600).step_by(10) {
        let (height, ratio) = vp.slot_height(1, 1, offset);
        assert!(ratio <= prev_ratio, "ratio rose at offset {offset}");
        assert!(height <= prev_height, "height rose at offset {offset}");
        prev_ratio = ratio;
        prev_height = height;
    }
    assert_eq!(vp.slot_height(1, 1, 300).1, 1.0);
    assert_eq!(vp.slot_height(1, 1, 600).1, 0.0);
}

#[test]
fn hit_test_resolves_card_and_rows() {
    let vp = phone_state(100);
    assert_eq!(vp.hit_test(0, 100.0), Some(0));
    assert_eq!(vp.hit_test(0, 600.0), Some(0));
    assert_eq!(vp.hit_test(0, 601.0), Some(1));
    assert_eq!(vp.hit_test(0, 950.0), Some(2));
    assert_eq!(vp.hit_test(450, 700.0), Some(2));
    assert_eq!(vp.hit_test(-999, 100.0), Some(0));

    assert_eq!(phone_state(3).hit_test(0, 5000.0), Some(2));
    assert_eq!(phone_state(0).hit_test(0, 10.0), None);
}

#[test]
fn snap_index_rounds_half_rows_forward() {
    let vp = phone_state(100);
    assert_eq!(vp.snap_index(450), Some(2));
    assert_eq!(vp.row_offset(2), 600);
    assert_eq!(vp.snap_index(449), Some(1));
    assert_eq!(vp.snap_index(-20), Some(0));
    assert_eq!(vp.snap_index(i64::MAX / 4), Some(99));
    assert_eq!(phone_state(0).snap_index(0), None);
}

#[test]
fn property_random_geometry_tiles_the_viewport() {
    let mut rng = Lcg::new(0xE1A5_71C0);
    let ratios = [1.0f32, 1.5, 1.75, 2.5, 4.0];

    for _case in 0..300 {
        let count = rng.gen_range_u32(1, 200) as usize;
        let min_row = rng.gen_range_u32(1, 500);
        let width = rng.gen_range_u32(0, 2000);
        let height = rng.gen_range_u32(1, 3000);
        let ratio = ratios[rng.gen_range_u32(0, ratios.len() as u32) as usize];
        let vp = ViewportState::new(width, height, count, min_row, ratio);

        assert!(vp.max_scroll_offset() >= 0);
        assert_eq!(vp.max_scroll_offset(), vp.content_height() - height as i64);

        for _ in 0..20 {
            let offset = rng.gen_range_i64(0, vp.max_scroll_offset());
            let range = vp.visible_range(offset, height);
            assert!(!range.is_empty());
            let start = range.start_index;
            let last = range.last_index().unwrap();
            assert!(start <= last && last < count);

            let card = vp.card_max_height() as i64;
            let row = min_row as i64;
            let mut top = start as i64 * row;
            assert!(top <= offset, "first slot starts below the viewport top");
            for index in start..=last {
                let (h, ratio) = vp.slot_height(index, start, offset);
                assert!((0.0..=1.0).contains(&ratio));
                top += h as i64;
            }
            if last > start {
                let (h0, _) = vp.slot_height(start, start, offset);
                let (h1, _) = vp.slot_height(start + 1, start, offset);
                assert_eq!(h0 as i64 + h1 as i64, card + row);
            }
            if last + 1 < count {
                assert!(
                    top >= offset + height as i64,
                    "gap below the last slot (offset={offset}, range={range:?})"
                );
            }
        }
    }
}

#[test]
fn layout_binds_visible_slots_contiguously() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    let pass = list.layout(&mut cards, &mut ());

    assert_eq!(pass.range.start_index, 0);
    assert_eq!(pass.range.end_index, 3);
    assert_eq!(pass.created, 3);
    assert_eq!(pass.reused, 0);

    let m = metrics(&list);
    assert_eq!(
        m.iter().map(|s| (s.top, s.height)).collect::<Vec<_>>(),
        [(0, 600), (600, 300), (900, 300)]
    );
    for pair in m.windows(2) {
        assert_eq!(pair[0].bottom(), pair[1].top);
    }

    let first = list.slot(0).unwrap().visual();
    assert_eq!(first.measured, (1050, 600));
    assert_eq!((first.top, first.width, first.height), (0, 1050, 600));
}

#[test]
fn layout_is_idempotent() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    let mut rec = Recorder::default();
    list.set_count(100);
    list.set_scroll_offset(450, &mut rec);

    list.layout(&mut cards, &mut rec);
    let before = metrics(&list);
    let renders = cards.renders.len();

    let again = list.layout(&mut cards, &mut rec);
    assert_eq!((again.evicted, again.reused, again.created), (0, 0, 0));
    assert_eq!(metrics(&list), before);
    assert_eq!(cards.renders.len(), renders);
    assert!(list.layout_if_needed(&mut cards, &mut rec).is_none());
}

#[test]
fn scrolling_recycles_evicted_slots_fifo() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    list.layout(&mut cards, &mut ());

    list.set_scroll_offset(900, &mut ());
    let pass = list.layout(&mut cards, &mut ());
    assert_eq!(pass.range.start_index, 3);
    assert_eq!(pass.range.end_index, 6);
    assert_eq!((pass.evicted, pass.reused, pass.created), (3, 3, 0));

    let ids: Vec<usize> = list.slots().map(|s| s.visual().id).collect();
    assert_eq!(ids, [0, 1, 2]);
    assert!(list.slots().all(|s| s.visual().recycled == 1));
    assert_eq!(list.slot_manager().pooled_len(), 0);
    assert_eq!(cards.renders[3..], [(3, true), (4, true), (5, true)]);
}

#[test]
fn property_recycler_invariants_hold_under_random_scrolling() {
    let mut rng = Lcg::new(7);
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(500);

    for step in 0..400 {
        if step % 97 == 0 {
            cards.count = rng.gen_range_u32(0, 500) as usize;
        }
        let max = list.max_scroll_offset();
        let offset = rng.gen_range_i64(-300, max + 300);
        list.set_scroll_offset(offset, &mut ());
        let pass = list.layout(&mut cards, &mut ());

        let live: Vec<usize> = list.slot_manager().live_indexes().collect();
        let expected: Vec<usize> = (pass.range.start_index..pass.range.end_index).collect();
        assert_eq!(live, expected);

        let manager = list.slot_manager();
        assert_eq!(manager.created(), cards.next_id);
        assert!(manager.live_len() + manager.pooled_len() <= manager.created());
    }
}

#[test]
fn empty_source_produces_no_slots() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(0);
    let mut rec = Recorder::default();

    let pass = list.layout(&mut cards, &mut rec);
    assert!(pass.range.is_empty());
    assert_eq!(list.slots().count(), 0);
    assert_eq!(list.max_scroll_offset(), 0);

    list.set_scroll_offset(40, &mut rec);
    assert_eq!(rec.ends, 0);
    assert!(rec.indexes.is_empty());
    assert_eq!(list.item_at(10.0), None);
}

#[test]
fn shrinking_to_zero_items_evicts_every_slot() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(10);
    list.layout(&mut cards, &mut ());

    cards.count = 0;
    let pass = list.layout_if_needed(&mut cards, &mut ()).unwrap();
    assert_eq!(pass.evicted, 3);
    assert_eq!(list.slot_manager().live_len(), 0);
    assert_eq!(list.slot_manager().pooled_len(), 3);
}

#[test]
fn zero_height_viewport_has_no_slots() {
    let mut list = ExpandList::<Card>::new(ExpandListOptions::new()).unwrap();
    let mut cards = Cards::new(10);
    assert!(list.layout(&mut cards, &mut ()).range.is_empty());

    list.set_viewport_size(Rect::new(1050, 1200));
    assert!(list.needs_layout());
    assert_eq!(list.layout(&mut cards, &mut ()).range.len(), 3);
}

#[test]
fn scroll_offset_changes_report_index_and_end_of_list() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut rec = Recorder::default();
    list.set_count(10);
    assert_eq!(list.max_scroll_offset(), 2700);

    list.set_scroll_offset(450, &mut rec);
    assert_eq!(rec.indexes, [1]);
    assert_eq!(rec.ends, 0);

    list.set_scroll_offset(2690, &mut rec);
    assert_eq!(rec.indexes, [1, 8]);
    assert_eq!(rec.ends, 1);

    list.set_scroll_offset(2689, &mut rec);
    assert_eq!(rec.ends, 1);

    list.set_scroll_offset(2689, &mut rec);
    assert_eq!(rec.indexes.len(), 3);

    list.set_scroll_offset(-100, &mut rec);
    assert_eq!(rec.indexes.last(), Some(&0));
    assert_eq!(list.scroll_offset(), -100);
    assert_eq!(list.clamped_scroll_offset(), 0);
}

#[test]
fn elastic_slots_report_ratio_every_pass() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    let mut rec = Recorder::default();

    list.layout(&mut cards, &mut rec);
    assert_eq!(rec.ratios, [(0, 1.0), (1, 0.0), (2, 0.0)]);

    rec.ratios.clear();
    list.layout(&mut cards, &mut rec);
    assert_eq!(rec.ratios, [(0, 1.0), (1, 0.0)]);

    rec.ratios.clear();
    list.set_scroll_offset(150, &mut rec);
    list.layout(&mut cards, &mut rec);
    assert_eq!(rec.ratios, [(0, 0.5), (1, 0.5), (3, 0.0)]);
}

#[test]
fn overscrolled_offset_is_clamped_for_layout() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    list.layout(&mut cards, &mut ());
    let at_top = metrics(&list);

    list.set_scroll_offset(-400, &mut ());
    list.layout(&mut cards, &mut ());
    assert_eq!(metrics(&list), at_top);
    assert_eq!(list.scroll_offset(), -400);
}

#[test]
fn notify_data_set_changed_rerenders_visible_items() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    list.layout(&mut cards, &mut ());
    assert_eq!(cards.renders.len(), 3);

    list.notify_data_set_changed();
    let pass = list.layout(&mut cards, &mut ());
    assert_eq!((pass.reused, pass.created), (3, 0));
    assert_eq!(cards.renders[3..], [(0, true), (1, true), (2, true)]);
    assert_eq!(list.slot_manager().created(), 3);
}

#[test]
fn scroll_to_index_lands_on_row_boundary() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    list.set_count(10);
    assert_eq!(list.scroll_to_index(4, &mut ()), 1200);
    assert_eq!(list.first_visible_index(), Some(4));
    assert_eq!(list.scroll_to_index(50, &mut ()), 2700);
}

#[test]
fn options_are_validated() {
    let zero = ExpandList::<Card>::new(ExpandListOptions::new().with_min_row_height(0));
    assert_eq!(zero.unwrap_err(), OptionsError::ZeroMinRowHeight);

    let flat = ExpandList::<Card>::new(ExpandListOptions::new().with_card_ratio(0.0));
    assert_eq!(flat.unwrap_err(), OptionsError::InvalidCardRatio(0.0));

    let nan = ExpandList::<Card>::new(ExpandListOptions::new().with_card_ratio(f32::NAN));
    assert!(matches!(nan, Err(OptionsError::InvalidCardRatio(r)) if r.is_nan()));

    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    assert!(list.set_min_row_height(0).is_err());
    assert_eq!(list.viewport().min_row_height(), 300);
    assert!(list.set_card_ratio(-1.0).is_err());
    assert_eq!(list.viewport().card_max_height(), 600);
}

#[test]
fn row_configuration_setters_recompute_geometry() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    list.set_count(10);

    list.set_card_ratio(3.5).unwrap();
    assert_eq!(list.viewport().card_max_height(), 300);

    list.set_min_row_height(100).unwrap();
    assert_eq!(list.max_scroll_offset(), 900);
    assert!(list.needs_layout());
}

#[test]
fn scroll_direction_follows_the_finger() {
    assert_eq!(ScrollDirection::from_delta(12.0), Some(ScrollDirection::Up));
    assert_eq!(ScrollDirection::from_delta(-0.5), Some(ScrollDirection::Down));
    assert_eq!(ScrollDirection::from_delta(0.0), None);
}

#[test]
fn clamped_setter_and_requested_relayout() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(10);
    list.layout(&mut cards, &mut ());

    list.set_scroll_offset_clamped(-50, &mut ());
    assert_eq!(list.scroll_offset(), 0);
    list.set_scroll_offset_clamped(10_000, &mut ());
    assert_eq!(list.scroll_offset(), 2700);

    list.layout(&mut cards, &mut ());
    assert!(list.layout_if_needed(&mut cards, &mut ()).is_none());

    list.request_layout();
    assert!(list.needs_layout());
    let pass = list.layout_if_needed(&mut cards, &mut ()).unwrap();
    assert_eq!((pass.evicted, pass.reused, pass.created), (0, 0, 0));
}

#[test]
fn clear_drops_live_and_pooled_visuals() {
    let mut list = ExpandList::<Card>::new(phone()).unwrap();
    let mut cards = Cards::new(100);
    list.layout(&mut cards, &mut ());
    list.notify_data_set_changed();
    assert_eq!(list.slot_manager().pooled_len(), 3);

    list.clear();
    assert_eq!(list.slot_manager().live_len(), 0);
    assert_eq!(list.slot_manager().pooled_len(), 0);
    assert!(list.needs_layout());

    let pass = list.layout(&mut cards, &mut ());
    assert_eq!((pass.reused, pass.created), (0, 3));
    assert_eq!(list.slot_manager().created(), 6);
}
