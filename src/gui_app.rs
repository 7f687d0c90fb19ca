use crate::overlay::{OverlayLayer, OverlayStyle};

/// Draws the nodes of an [`OverlayLayer`] with egui.
pub struct GuiApp {
    layer: OverlayLayer,
}

impl GuiApp {
    pub fn new(layer: OverlayLayer) -> Self {
        Self { layer }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        for (index, node) in self.layer.nodes().into_iter().enumerate() {
            if !node.visible {
                continue;
            }

            let style = &node.style;
            egui::Window::new("overlay")
                .id(egui::Id::new(("overlay", index)))
                .anchor(egui::Align2::LEFT_TOP, egui::Vec2::new(style.offset[0], style.offset[1]))
                .title_bar(false)
                .resizable(false)
                .interactable(false)
                .collapsible(false)
                .frame(frame(style))
                .show(ctx, |ui| {
                    ui.set_min_width(style.min_width);
                    ui.set_min_height(style.height);

                    let text = egui::RichText::new(&node.text)
                        .size(style.font_size)
                        .color(color(style.text_color));
                    ui.add(egui::Label::new(text).wrap(!style.preserve_whitespace));
                });
        }
    }
}

fn color([r, g, b, a]: [u8; 4]) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn frame(style: &OverlayStyle) -> egui::Frame {
    egui::Frame::none()
        .fill(color(style.background))
        .inner_margin(egui::Margin::symmetric(style.padding[1], style.padding[0]))
        .outer_margin(egui::Margin::same(style.margin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{DisplayRoot, OverlaySink};

    /// Runs a few headless frames and returns the shape count of the last one.
    fn shapes_drawn(app: &mut GuiApp) -> usize {
        let ctx = egui::Context::default();
        let mut shapes = 0;
        for _ in 0..3 {
            shapes = ctx.run(Default::default(), |ctx| app.ui(ctx)).shapes.len();
        }
        shapes
    }

    #[test]
    fn hidden_nodes_are_not_drawn() {
        let mut layer = OverlayLayer::new();
        let mut hidden = layer.attach(&OverlayStyle::default());
        hidden.set_text("FPS 60");
        hidden.set_visible(false);

        let mut app = GuiApp::new(layer);
        assert_eq!(shapes_drawn(&mut app), 0);
    }

    #[test]
    fn visible_nodes_are_drawn() {
        let mut layer = OverlayLayer::new();
        let mut hidden = layer.attach(&OverlayStyle::default());
        hidden.set_visible(false);
        let mut shown = layer.attach(&OverlayStyle::default());
        shown.set_text("ms  16");

        let mut app = GuiApp::new(layer.clone());
        assert!(shapes_drawn(&mut app) > 0);

        shown.set_visible(false);
        assert_eq!(shapes_drawn(&mut app), 0);
    }
}
