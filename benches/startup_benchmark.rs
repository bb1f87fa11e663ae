use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mobilecli::agent::elements::filter_visible;
use mobilecli::agent::gesture::translate_to_press_move_release;
use mobilecli::models::screen::{Rect, ScreenElement, ScreenElementType, TapAction, TapActionKind};

fn gesture_translation_benchmark(c: &mut Criterion) {
    let actions: Vec<TapAction> = (0..50)
        .flat_map(|i| {
            let x = i as f64;
            vec![
                TapAction::new(TapActionKind::PointerMove).at(x, x),
                TapAction::new(TapActionKind::PointerDown),
                TapAction::new(TapActionKind::Pause).with_duration_ms(10),
                TapAction::new(TapActionKind::PointerMove).at(x + 1.0, x),
                TapAction::new(TapActionKind::PointerUp),
            ]
        })
        .collect();

    c.bench_function("gesture_translation", |b| {
        b.iter(|| black_box(translate_to_press_move_release(black_box(&actions))))
    });
}

fn element_filtering_benchmark(c: &mut Criterion) {
    let elements: Vec<(ScreenElement, bool)> = (0..500)
        .map(|i| {
            let element = ScreenElement {
                element_type: ScreenElementType::Button,
                label: if i % 3 == 0 { None } else { Some(format!("item-{i}")) },
                name: None,
                value: None,
                identifier: None,
                text: None,
                focused: None,
                rect: Rect {
                    x: i as f64,
                    y: i as f64,
                    width: 10.0,
                    height: 10.0,
                },
            };
            (element, i % 5 != 0)
        })
        .collect();

    c.bench_function("element_filtering", |b| {
        b.iter(|| black_box(filter_visible(black_box(elements.clone()))))
    });
}

criterion_group!(benches, gesture_translation_benchmark, element_filtering_benchmark);
criterion_main!(benches);
