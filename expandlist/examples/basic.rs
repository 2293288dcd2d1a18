// Example: drive the headless list by hand and print what a renderer would draw.
use expandlist::{ExpandList, ExpandListOptions, ItemSource, Rect, Visual};

#[derive(Debug, Default)]
struct Row {
    label: String,
    top: i64,
    height: u32,
}

impl Visual for Row {
    fn measure(&mut self, _width: u32, height: u32) {
        self.height = height;
    }

    fn place(&mut self, top: i64, _width: u32, height: u32) {
        self.top = top;
        self.height = height;
    }

    fn recycle(&mut self) {
        self.label.clear();
    }
}

struct Labels(Vec<String>);

impl ItemSource for Labels {
    type Visual = Row;

    fn count(&self) -> usize {
        self.0.len()
    }

    fn render_item(&mut self, index: usize, recycled: Option<Row>) -> Row {
        let mut row = recycled.unwrap_or_default();
        row.label.push_str(&self.0[index]);
        row
    }
}

fn main() -> Result<(), expandlist::OptionsError> {
    let mut source = Labels((0..1_000).map(|i| format!("item #{i}")).collect());
    let mut list = ExpandList::new(
        ExpandListOptions::new().with_initial_rect(Some(Rect::new(1050, 1200))),
    )?;

    for offset in [0, 150, 450, 12_345] {
        list.set_scroll_offset(offset, &mut ());
        let pass = list.layout(&mut source, &mut ());
        println!(
            "offset={offset} range={:?} evicted={} reused={} created={}",
            pass.range, pass.evicted, pass.reused, pass.created
        );
        for slot in list.slots() {
            let row = slot.visual();
            let m = slot.metrics();
            println!(
                "  {:>10} screen_top={:>5} height={:>4} ratio={:.2}",
                row.label,
                row.top - offset,
                row.height,
                m.ratio
            );
        }
    }
    Ok(())
}
