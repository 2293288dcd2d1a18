use expandlist::{ExpandListOptions, ItemSource, ListListener, Rect, Visual};
use expandlist_adapter::{Controller, ControllerError, ControllerOptions, PointerEvent};

#[derive(Debug, Default)]
struct Card {
    index: usize,
    top: i64,
    height: u32,
}

impl Visual for Card {
    fn measure(&mut self, _width: u32, _height: u32) {}

    fn place(&mut self, top: i64, _width: u32, height: u32) {
        self.top = top;
        self.height = height;
    }
}

struct Feed(usize);

impl ItemSource for Feed {
    type Visual = Card;

    fn count(&self) -> usize {
        self.0
    }

    fn render_item(&mut self, index: usize, recycled: Option<Card>) -> Card {
        let mut card = recycled.unwrap_or_default();
        card.index = index;
        card
    }
}

struct Printer;

impl ListListener<Card> for Printer {
    fn on_item_index_changed(&mut self, index: usize) {
        println!("  top card -> {index}");
    }

    fn on_item_clicked(&mut self, index: usize) {
        println!("clicked {index}");
    }
}

fn main() -> Result<(), ControllerError> {
    // Example: a scripted swipe followed by a tap, with the host polling the ticker.
    //
    // An adapter would:
    // - forward touch events to on_pointer
    // - call tick(now_ms) whenever next_tick_at() is due
    // - draw every live slot at its top/height
    let list = ExpandListOptions::new().with_initial_rect(Some(Rect::new(1050, 1200)));
    let mut c = Controller::new(ControllerOptions::new(list), Feed(500), Printer)?;
    c.layout();

    c.on_pointer(PointerEvent::down(0.0, 1000.0, 0));
    for k in 1..=10u64 {
        c.on_pointer(PointerEvent::moved(0.0, 1000.0 - 60.0 * k as f32, k * 10));
    }
    let release = c.on_pointer(PointerEvent::up(0.0, 340.0, 110));
    println!("release: {release:?} at offset {}", c.scroll_offset());

    let mut frames = 0u32;
    while let Some(at) = c.next_tick_at() {
        if let Some(off) = c.tick(at) {
            frames += 1;
            if frames % 5 == 0 {
                println!("t={at} off={off} visible={:?}", c.list().visible_range());
            }
        }
    }
    println!("rest: off={} range={:?}", c.scroll_offset(), c.list().visible_range());

    for slot in c.list().slots() {
        let card = slot.visual();
        println!(
            "  #{:<3} top={:<6} height={:<4} ratio={:.2}",
            card.index,
            card.top,
            card.height,
            slot.metrics().ratio
        );
    }

    c.on_pointer(PointerEvent::down(0.0, 700.0, 2_000));
    c.on_pointer(PointerEvent::up(0.0, 700.0, 2_050));
    Ok(())
}
