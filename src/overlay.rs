use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Fixed look of the meter overlay, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Offset from the top-left corner of the display root.
    pub offset: [f32; 2],
    /// Straight (unmultiplied) RGBA.
    pub background: [u8; 4],
    pub text_color: [u8; 4],
    pub margin: f32,
    pub font_size: f32,
    pub min_width: f32,
    pub height: f32,
    /// Vertical, horizontal.
    pub padding: [f32; 2],
    /// Keep runs of spaces and never wrap.
    pub preserve_whitespace: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            background: [0xff, 0xff, 0xff, 0x7f],
            text_color: [0x00, 0x00, 0x00, 0xff],
            margin: 4.0,
            font_size: 20.0,
            min_width: 67.0,
            height: 24.0,
            padding: [8.0, 6.0],
            preserve_whitespace: true,
        }
    }
}

/// A text-bearing surface the meter writes its label into.
pub trait OverlaySink {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
}

/// Something overlay sinks can be attached to.
pub trait DisplayRoot {
    type Sink: OverlaySink;

    /// Creates a new visible sink with `style` and attaches it to the root.
    fn attach(&mut self, style: &OverlayStyle) -> Self::Sink;
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayNode {
    pub text: String,
    pub visible: bool,
    pub style: OverlayStyle,
}

/// In-memory display root, drawn each frame by [`GuiApp`](crate::gui_app::GuiApp).
///
/// Clones share the same nodes. The layer owns the nodes; sinks handed out by
/// [`DisplayRoot::attach`] only hold weak references to them.
#[derive(Debug, Clone, Default)]
pub struct OverlayLayer {
    nodes: Rc<RefCell<Vec<Rc<RefCell<OverlayNode>>>>>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Snapshot of all attached nodes, in attach order.
    pub fn nodes(&self) -> Vec<OverlayNode> {
        self.nodes
            .borrow()
            .iter()
            .map(|node| node.borrow().clone())
            .collect()
    }

    /// Drops every node. Outstanding handles become inert.
    pub fn clear(&self) {
        self.nodes.borrow_mut().clear();
    }
}

impl DisplayRoot for OverlayLayer {
    type Sink = OverlayHandle;

    fn attach(&mut self, style: &OverlayStyle) -> OverlayHandle {
        let node = Rc::new(RefCell::new(OverlayNode {
            text: String::new(),
            visible: true,
            style: style.clone(),
        }));
        let handle = OverlayHandle {
            node: Rc::downgrade(&node),
        };
        self.nodes.borrow_mut().push(node);
        handle
    }
}

#[derive(Debug, Clone)]
pub struct OverlayHandle {
    node: Weak<RefCell<OverlayNode>>,
}

impl OverlayHandle {
    pub fn is_alive(&self) -> bool {
        self.node.strong_count() > 0
    }
}

impl OverlaySink for OverlayHandle {
    fn set_text(&mut self, text: &str) {
        if let Some(node) = self.node.upgrade() {
            let mut node = node.borrow_mut();
            node.text.clear();
            node.text.push_str(text);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(node) = self.node.upgrade() {
            node.borrow_mut().visible = visible;
        }
    }
}
