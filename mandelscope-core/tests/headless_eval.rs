use mandelscope_core::{
    EngineConfig, EscapeTime, InputEvent, IterationBudget, Viewport, ViewportController,
};

/// Evaluate every pixel of a grid serially, row-major.
fn eval_grid(viewport: &Viewport, budget: IterationBudget, width: u32, height: u32) -> Vec<f64> {
    let escape = EscapeTime::new(budget);
    let mut values = Vec::with_capacity((width * height) as usize);
    for py in 0..height {
        for px in 0..width {
            values.push(escape.fraction(viewport.pixel_to_complex(px, py, width, height)));
        }
    }
    values
}

#[test]
fn viewport_center_is_inside_the_set() {
    let cfg = EngineConfig::default();
    let c = cfg
        .viewport
        .pixel_to_complex(360, 240, cfg.width, cfg.height);
    assert!((c.re - (-0.75)).abs() < 1e-12);
    assert!(c.im.abs() < 1e-12);
    assert_eq!(EscapeTime::new(cfg.max_iterations).fraction(c), 1.0);
}

#[test]
fn default_view_has_interior_and_exterior() {
    let values = eval_grid(&Viewport::default(), IterationBudget::DEFAULT, 90, 60);
    let interior = values.iter().filter(|&&v| v == 1.0).count();
    assert!(interior > 0, "should have some interior points");
    assert!(interior < values.len(), "should have some escaped points");
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn serial_evaluation_is_deterministic() {
    let vp = Viewport::default();
    let a = eval_grid(&vp, IterationBudget::DEFAULT, 64, 48);
    let b = eval_grid(&vp, IterationBudget::DEFAULT, 64, 48);
    assert_eq!(a, b);
}

#[test]
fn zoom_in_changes_the_picture() {
    let mut vp = Viewport::default();
    let mut budget = IterationBudget::DEFAULT;
    let before = eval_grid(&vp, budget, 64, 48);
    ViewportController::new(&mut vp, &mut budget, 0.016)
        .apply_all([InputEvent::ZoomIn, InputEvent::ZoomIn, InputEvent::PanLeft]);
    let after = eval_grid(&vp, budget, 64, 48);
    assert_ne!(before, after);
}
