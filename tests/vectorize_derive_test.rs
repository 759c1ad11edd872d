use approx::assert_abs_diff_eq;
use kinetic::prelude::*;
use kinetic::{AnimationError, ValueKind};

#[derive(Clone, Debug, PartialEq, Vectorize)]
struct Shadow {
    offset: Point,
    blur: f32,
    color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Vectorize)]
#[vectorize(kind = "Point")]
struct Anchor {
    u: f32,
    v: f32,
}

fn shadow(x: f32, blur: f32, alpha: f32) -> Shadow {
    Shadow {
        offset: Point::new(x, x),
        blur,
        color: Color::rgba(0.0, 0.0, 0.0, alpha),
    }
}

mod layout {
    use super::*;

    #[test]
    fn when_derived_without_kind_then_custom_with_all_field_components() {
        let value = shadow(2.0, 4.0, 0.5).vectorize();

        assert_eq!(Shadow::KIND, ValueKind::Custom);
        assert_eq!(Shadow::COMPONENTS, 7);
        assert_eq!(value.components(), &[2.0, 2.0, 4.0, 0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn when_kind_given_then_value_shares_layout_with_builtin() {
        let anchor = Anchor { u: 0.25, v: 0.75 }.vectorize();
        let point = Point::new(0.25, 0.75).vectorize();

        assert_eq!(anchor.kind(), ValueKind::Point);
        assert!(anchor.is_compatible(&point));
        assert_eq!(
            Point::from_vectorized(&anchor).unwrap(),
            Point::new(0.25, 0.75)
        );
    }

    #[test]
    fn when_read_back_then_fields_restored() {
        let original = shadow(-3.0, 8.0, 1.0);

        let restored = Shadow::from_vectorized(&original.vectorize()).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn when_kind_differs_then_read_back_fails() {
        let point = Point::new(1.0, 2.0).vectorize();

        let result = Shadow::from_vectorized(&point);

        assert!(matches!(result, Err(AnimationError::TypeMismatch { .. })));
    }
}

mod animation {
    use super::*;

    #[test]
    fn when_animated_then_every_field_interpolates() {
        let mut target = PropertyMap::new().with("shadow", &shadow(0.0, 0.0, 0.0));
        let mut animator =
            PropertyAnimator::between("shadow", &shadow(0.0, 0.0, 0.0), &shadow(10.0, 6.0, 1.0), 1.0);

        animator.advance(0.5, &mut target).unwrap();

        let midway = target.get::<Shadow>("shadow").unwrap();
        assert_abs_diff_eq!(midway.offset.x, 5.0);
        assert_abs_diff_eq!(midway.offset.y, 5.0);
        assert_abs_diff_eq!(midway.blur, 3.0);
        assert_abs_diff_eq!(midway.color.a, 0.5);
    }

    #[test]
    fn when_scheduled_then_derived_value_reaches_target() {
        let view = std::rc::Rc::new(std::cell::RefCell::new(
            PropertyMap::new().with("anchor", &Anchor { u: 0.0, v: 0.0 }),
        ));
        let mut scheduler = Scheduler::default();
        let target = scheduler.register_target(std::rc::Rc::downgrade(&view));
        scheduler
            .add(
                target,
                PropertyAnimator::between(
                    "anchor",
                    &Anchor { u: 0.0, v: 0.0 },
                    &Anchor { u: 1.0, v: 0.5 },
                    0.25,
                )
                .easing(Easing::OutCubic),
            )
            .unwrap();

        while scheduler.has_active() {
            scheduler.tick(1.0 / 60.0);
        }

        assert_eq!(
            view.borrow().get::<Anchor>("anchor"),
            Some(Anchor { u: 1.0, v: 0.5 })
        );
    }
}
