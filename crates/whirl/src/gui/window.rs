use gtk4 as gtk;
use gtk4_layer_shell::{KeyboardMode, Layer, LayerShell};

/// Floats the indicator above other windows. With no edge anchored, the
/// compositor centers the surface on the output.
pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("whirl"));
    window.set_exclusive_zone(-1);
    window.set_keyboard_mode(KeyboardMode::None);
}
