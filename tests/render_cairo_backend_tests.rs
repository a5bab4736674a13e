#![cfg(feature = "cairo-backend")]

use chart_timeline::ChartError;
use chart_timeline::config::PriceAxisRendererOptions;
use chart_timeline::core::{IndexRange, Size};
use chart_timeline::render::{
    CairoCanvas, Canvas, Color, LabelAlign, LineRenderer, LineRendererData, LineStrokeItem,
    LineType, PaneRenderer, PriceAxisViewRenderer, PriceAxisViewRendererCommonData,
    PriceAxisViewRendererData, RenderingTarget, TextWidthCache,
};

#[test]
fn cairo_canvas_rejects_invalid_surface_size() {
    let err = CairoCanvas::with_image_surface(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn curved_line_and_label_draw_on_image_surface() {
    let mut canvas = CairoCanvas::with_image_surface(300, 200).expect("surface");
    let mut line = LineRenderer::new();
    line.set_data(Some(LineRendererData {
        items: (0..10)
            .map(|i| LineStrokeItem {
                x: f64::from(i) * 15.0,
                y: 50.0 + f64::from(i % 3) * 10.0,
                color: (i > 5).then_some(Color::rgb(0.9, 0.1, 0.1)),
            })
            .collect(),
        visible_range: Some(IndexRange::new(0, 10)),
        line_type: LineType::Curved,
        line_color: Color::rgb(0.1, 0.4, 0.9),
        line_width: 2.0,
        ..LineRendererData::default()
    }));
    let label = PriceAxisViewRenderer::new(
        PriceAxisViewRendererData {
            visible: true,
            text: "101.25".to_owned(),
            tick_visible: true,
            move_text_to_invisible_tick: false,
            separator_visible: true,
        },
        PriceAxisViewRendererCommonData {
            coordinate: 60.0,
            background: Color::rgb(0.1, 0.4, 0.9),
            color: Color::rgb(1.0, 1.0, 1.0),
            ..PriceAxisViewRendererCommonData::default()
        },
    );

    {
        let mut target =
            RenderingTarget::with_pixel_ratio(&mut canvas, Size::new(150.0, 100.0), 2.0)
                .expect("target");
        line.draw(&mut target).expect("line");
        label
            .draw(
                &mut target,
                &PriceAxisRendererOptions::default(),
                &mut TextWidthCache::default(),
                LabelAlign::Left,
            )
            .expect("label");
    }

    let metrics = canvas.measure_text("101.25");
    assert!(metrics.width >= 0.0);
    assert_eq!(canvas.surface().map(|surface| surface.width()), Some(300));
}
