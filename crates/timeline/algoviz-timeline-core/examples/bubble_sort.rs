//! Full bubble sort over `[5, 3, 4, 1, 2]`, printed frame by frame.
//!
//! Run with `cargo run -p algoviz-timeline-core --example bubble_sort`.

use algoviz_timeline::{ArrayBar, ArrayBarLayout, EventOptions, HighlightTarget, Scene, Timeline};

fn build() -> anyhow::Result<(Scene, Timeline)> {
    let data = [5.0f32, 3.0, 4.0, 1.0, 2.0];
    let n = data.len();
    let scene = Scene::new(140, 80).with_actor(
        ArrayBar::new("A", data.to_vec()).with_layout(ArrayBarLayout::default()),
    )?;

    let mut tl = Timeline::new(20);
    tl.highlight(
        "A",
        HighlightTarget::Range(0, n - 1),
        EventOptions::new().note(format!("init range [0..{}]", n - 1)),
    );

    let mut shadow = data;
    for end in (1..n).rev() {
        for i in 0..end {
            tl.compare(
                "A",
                i,
                i + 1,
                EventOptions::new().duration(3).note(format!("compare({i},{})", i + 1)),
            );
            if shadow[i] > shadow[i + 1] {
                tl.swap(
                    "A",
                    i,
                    i + 1,
                    EventOptions::new().duration(2).note(format!("swap({i},{})", i + 1)),
                );
                shadow.swap(i, i + 1);
            }
        }
        tl.highlight_only(
            "A",
            HighlightTarget::Range(0, end - 1),
            EventOptions::new().note(format!("unsorted [0..{}]", end - 1)),
        );
    }
    tl.clear_highlight("A", EventOptions::new())
        .mark_sorted("A", n - 1, EventOptions::new().note("sorted all"));
    Ok((scene, tl))
}

fn main() -> anyhow::Result<()> {
    let (scene, tl) = build()?;
    let frames = tl.build_frames(&scene)?;
    println!("{} events -> {} frames @ {} fps", tl.len(), frames.len(), tl.fps());
    for frame in &frames {
        let Some(bar) = frame.array_bar("A") else {
            continue;
        };
        println!(
            "{:>4}  {:<20} {:?}",
            frame.index(),
            frame.note().unwrap_or("-"),
            bar.slot_values()
        );
    }
    let ops = scene.render_frame(frames.last().ok_or_else(|| anyhow::anyhow!("no frames"))?)?;
    println!("last frame draws {} ops", ops.len());
    Ok(())
}
