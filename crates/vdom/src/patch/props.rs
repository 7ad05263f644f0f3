use anyhow::Result;

use crate::props::Props;
use crate::target::RenderTarget;

/// Brings the attributes and styles of `node` from `old` to `new`.
///
/// Stale styles are cleared first, then stale attributes are removed, then
/// everything in `new` is written. Entries whose value did not change between
/// `old` and `new` are not written again, so patching identical maps touches
/// nothing.
///
/// # Errors
/// Propagates the first failure reported by the render target.
pub fn patch_props<T>(target: &mut T, node: T::Node, old: &Props, new: &Props) -> Result<()>
where
    T: RenderTarget + ?Sized,
{
    for name in old.styles().keys() {
        if !new.styles().contains_key(name) {
            target.clear_style(node, name)?;
        }
    }

    for name in old.attrs().keys() {
        if !new.attrs().contains_key(name) {
            target.remove_attribute(node, name)?;
        }
    }

    for (name, value) in new.styles() {
        if old.style(name) != Some(value.as_str()) {
            target.set_style(node, name, value)?;
        }
    }
    for (name, value) in new.attrs() {
        if old.attr(name) != Some(value.as_str()) {
            target.set_attribute(node, name, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, DomMutation};

    #[test]
    fn removes_stale_sets_new_and_clears_styles() {
        let mut dom = Dom::new();
        let node = dom.create_element("div").unwrap();
        let old = Props::new().with_attr("id", "a").with_style("color", "red");
        patch_props(&mut dom, node, &Props::new(), &old).unwrap();
        assert_eq!(dom.attribute(node, "id"), Some("a"));
        assert_eq!(dom.style(node, "color"), Some("red"));

        let new = Props::new().with_attr("class", "b");
        patch_props(&mut dom, node, &old, &new).unwrap();
        assert_eq!(dom.attribute(node, "id"), None);
        assert_eq!(dom.attribute(node, "class"), Some("b"));
        assert_eq!(dom.style(node, "color"), None);
    }

    #[test]
    fn clears_styles_before_removing_attributes() {
        let mut dom = Dom::new();
        let node = dom.create_element("p").unwrap();
        let old = Props::new().with_attr("title", "t").with_style("margin", "0");
        patch_props(&mut dom, node, &Props::new(), &old).unwrap();
        dom.clear_mutations();

        patch_props(&mut dom, node, &old, &Props::new()).unwrap();
        let kinds: Vec<&str> = dom.mutations().iter().map(DomMutation::name).collect();
        assert_eq!(kinds, ["clear-style", "remove-attr"]);
    }

    #[test]
    fn identical_maps_write_nothing() {
        let mut dom = Dom::new();
        let node = dom.create_element("div").unwrap();
        let props = Props::new().with_attr("id", "a").with_style("color", "red");
        patch_props(&mut dom, node, &Props::new(), &props).unwrap();
        dom.clear_mutations();

        patch_props(&mut dom, node, &props, &props.clone()).unwrap();
        assert!(dom.mutations().is_empty());
    }

    #[test]
    fn changed_value_overwrites() {
        let mut dom = Dom::new();
        let node = dom.create_element("div").unwrap();
        let old = Props::new().with_style("color", "red");
        patch_props(&mut dom, node, &Props::new(), &old).unwrap();

        let new = Props::new().with_style("color", "blue");
        patch_props(&mut dom, node, &old, &new).unwrap();
        assert_eq!(dom.style(node, "color"), Some("blue"));
    }
}
