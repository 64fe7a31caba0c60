use locdir::{Bounds, LatLng, Viewport};
use proptest::prelude::*;

#[test]
fn empty_bounds_have_no_fit() {
    let b = Bounds::new();
    assert!(b.is_empty());
    assert_eq!(b.center(), None);
    assert_eq!(b.fit_zoom(Viewport { width: 100.0, height: 100.0 }), None);
}

#[test]
fn non_finite_points_are_ignored() {
    let mut b = Bounds::new();
    b.extend(LatLng::new(f64::NAN, 1.0));
    assert!(b.is_empty());
    b.extend(LatLng::new(1.0, 2.0));
    b.extend(LatLng::new(3.0, -2.0));
    assert_eq!(b.south_west(), Some(LatLng::new(1.0, -2.0)));
    assert_eq!(b.north_east(), Some(LatLng::new(3.0, 2.0)));
    assert_eq!(b.center(), Some(LatLng::new(2.0, 0.0)));
}

#[test]
fn single_point_fits_at_max_zoom() {
    let b = Bounds::from_points([LatLng::new(25.2, 55.3)]);
    assert_eq!(b.fit_zoom(Viewport { width: 800.0, height: 600.0 }), Some(21.0));
}

#[test]
fn wider_span_means_lower_zoom() {
    let vp = Viewport { width: 800.0, height: 600.0 };
    let near = Bounds::from_points([LatLng::new(25.0, 55.0), LatLng::new(25.1, 55.1)]);
    let far = Bounds::from_points([LatLng::new(25.0, 55.0), LatLng::new(45.0, 5.0)]);
    assert!(near.fit_zoom(vp).unwrap() > far.fit_zoom(vp).unwrap());
}

proptest! {
    #[test]
    fn box_covers_all_points(pts in prop::collection::vec((-85.0f64..85.0, -180.0f64..180.0), 1..32)) {
        let pts: Vec<LatLng> = pts.into_iter().map(|(a, b)| LatLng::new(a, b)).collect();
        let b = Bounds::from_points(pts.iter().copied());
        for p in &pts {
            prop_assert!(b.contains(*p));
        }
        let z = b.fit_zoom(Viewport { width: 640.0, height: 480.0 }).unwrap();
        prop_assert!((0.0..=21.0).contains(&z));
        prop_assert!(b.contains(b.center().unwrap()));
    }
}
