/// DOM-like root node the presenter writes theme markers to.
///
/// Implementations must treat adding a present class, removing an absent
/// class and re-setting an attribute to its current value as no-ops.
pub trait RenderTarget: Send {
    fn add_class(&mut self, class: &str);

    fn remove_class(&mut self, class: &str);

    fn set_attribute(&mut self, name: &str, value: &str);
}
