//! Integration tests for paint propagation, hit testing and cross-thread
//! visibility changes.

#[cfg(test)]
mod tests {
    use std::thread;

    use pretty_assertions::assert_eq;
    use trellis::{
        Error, Event, ItemId, Layout, LayoutItem, PaintEvent, PaintRegion, Result,
        geom::{Point, Rect, Size},
        testing::Harness,
    };

    /// A 100x10 harness with two children, `a` covering the left half and
    /// `b` the right.
    fn halves() -> Result<(Harness, ItemId, ItemId)> {
        let mut h = Harness::builder().size(100.0, 10.0).build()?;
        let a = h.add(LayoutItem::new("a", None))?;
        let b = h.add(LayoutItem::new("b", None))?;
        h.settle()?;
        Ok((h, a, b))
    }

    /// Tick twice: once for the event posted to the owner, once for what it
    /// forwarded. Returns the forwarded envelopes' targets.
    fn forwarded(h: &mut Harness) -> Result<Vec<ItemId>> {
        let first = h.core.tick()?;
        assert_eq!(first.len(), 1);
        assert!(first[0].is_accepted());
        Ok(h.core.tick()?.iter().map(|e| e.target).collect())
    }

    #[test]
    fn paint_reaches_overlapping_children() -> Result<()> {
        let (mut h, a, b) = halves()?;

        let region = Rect::new(-25.0, 0.0, 10.0, 10.0);
        h.core.post(h.root, Event::Repaint(PaintEvent::global(region)))?;
        h.core.tick()?;
        let second = h.core.tick()?;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].target, a);
        assert_eq!(second[0].emitter, Some(h.root));
        assert_eq!(second[0].event, Event::Repaint(PaintEvent::global(region)));
        assert!(h.core.get(a)?.repaint_pending());

        h.core.post(
            h.root,
            Event::Repaint(PaintEvent::global(Rect::new(0.0, 0.0, 20.0, 10.0))),
        )?;
        assert_eq!(forwarded(&mut h)?, vec![a, b]);
        Ok(())
    }

    #[test]
    fn paint_skips_the_emitter() -> Result<()> {
        let (mut h, a, b) = halves()?;
        h.core.poster().post(
            h.root,
            Some(a),
            Event::Repaint(PaintEvent::global(Rect::new(0.0, 0.0, 20.0, 10.0))),
        )?;
        assert_eq!(forwarded(&mut h)?, vec![b]);
        Ok(())
    }

    #[test]
    fn paint_skips_hidden_children() -> Result<()> {
        let (mut h, a, b) = halves()?;
        h.core.hide(b)?;
        h.settle()?;
        h.core.post(
            h.root,
            Event::Repaint(PaintEvent::global(Rect::new(0.0, 0.0, 100.0, 10.0))),
        )?;
        assert_eq!(forwarded(&mut h)?, vec![a]);
        Ok(())
    }

    #[test]
    fn local_paint_regions_stay_put() -> Result<()> {
        let (mut h, _, _) = halves()?;
        h.core.post(
            h.root,
            Event::Repaint(PaintEvent::new(vec![PaintRegion::local(Rect::new(
                0.0, 0.0, 100.0, 10.0,
            ))])),
        )?;
        assert_eq!(forwarded(&mut h)?, Vec::<ItemId>::new());
        assert!(h.core.get(h.root)?.repaint_pending());
        Ok(())
    }

    /// An overlay tree: `top` at z 1 beside `group` at z 0, which holds
    /// `inner` at z 1. Everything covers the whole window.
    fn stacked() -> Result<(Harness, ItemId, ItemId, ItemId)> {
        let mut h = Harness::builder()
            .size(100.0, 100.0)
            .layout(Layout::overlay())
            .build()?;
        let group = h.add(
            LayoutItem::new("group", None)
                .with_z_order(0)
                .with_layout(Layout::overlay()),
        )?;
        let inner = h.add_to(group, LayoutItem::new("inner", None).with_z_order(1))?;
        let top = h.add(LayoutItem::new("top", None).with_z_order(1))?;
        h.settle()?;
        Ok((h, group, inner, top))
    }

    #[test]
    fn z_order_strings_concatenate_ancestors() -> Result<()> {
        let (h, group, inner, top) = stacked()?;
        assert_eq!(h.core.z_order_string(h.root), "");
        assert_eq!(h.core.z_order_string(group), "0");
        assert_eq!(h.core.z_order_string(inner), "01");
        assert_eq!(h.core.z_order_string(top), "1");
        Ok(())
    }

    #[test]
    fn hit_testing_prefers_the_higher_string() -> Result<()> {
        let (mut h, group, inner, top) = stacked()?;
        assert_eq!(h.area(inner)?, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(h.core.get_item_at(h.root, Point::zero()), Some(top));

        h.core.update_item(group, |i| i.set_z_order(2))?;
        assert_eq!(h.core.get_item_at(h.root, Point::zero()), Some(inner));
        assert_eq!(h.core.get_item_at(group, Point::zero()), Some(inner));
        assert_eq!(h.core.get_item_at(h.root, Point::new(500.0, 0.0)), None);
        Ok(())
    }

    #[test]
    fn hit_testing_ties_go_to_the_last_child() -> Result<()> {
        let mut h = Harness::builder().layout(Layout::overlay()).build()?;
        let first = h.add(LayoutItem::new("first", None).with_z_order(1))?;
        let second = h.add(LayoutItem::new("second", None).with_z_order(1))?;
        h.settle()?;
        assert_eq!(h.core.get_item_at(h.root, Point::zero()), Some(second));

        h.core.hide(second)?;
        h.settle()?;
        assert_eq!(h.core.get_item_at(h.root, Point::zero()), Some(first));
        Ok(())
    }

    #[test]
    fn visibility_toggles_from_another_thread() -> Result<()> {
        let mut h = Harness::builder().size(100.0, 10.0).build()?;
        let a = h.add(LayoutItem::new("a", Some(Size::new(10.0, 10.0))))?;
        let b = h.add(LayoutItem::new("b", Some(Size::new(10.0, 10.0))))?;
        h.settle()?;

        let handle = h.core.visibility_handle(b)?;
        let changed = thread::spawn(move || handle.hide())
            .join()
            .map_err(|_| Error::Internal("visibility thread panicked".into()))??;
        assert!(changed);
        assert!(!h.core.get(b)?.is_visible());

        h.settle()?;
        assert_eq!(h.area(a)?.w, 100.0);

        let handles: Vec<_> = (0..4)
            .map(|_| h.core.visibility_handle(b))
            .collect::<Result<Vec<_>>>()?;
        let workers: Vec<_> = handles
            .into_iter()
            .map(|handle| thread::spawn(move || handle.show()))
            .collect();
        let mut changes = 0;
        for worker in workers {
            let changed = worker
                .join()
                .map_err(|_| Error::Internal("visibility thread panicked".into()))??;
            if changed {
                changes += 1;
            }
        }
        assert_eq!(changes, 1);
        h.settle()?;
        assert_eq!(h.area(a)?.w, 50.0);
        assert_eq!(h.area(b)?.w, 50.0);
        Ok(())
    }
}
