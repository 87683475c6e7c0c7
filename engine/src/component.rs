// component.rs
//
// The fixed engine-integration surface the generator targets. The engine
// owns these collections; generated code only names them.

use strum::Display;

/// Component collections owned by the engine runtime. Display gives the
/// GameState field name, `c_type` the type declared by the engine headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Component {
    #[strum(serialize = "registry")]
    Registry,
    #[strum(serialize = "transforms")]
    Transforms,
    #[strum(serialize = "renderables")]
    Renderables,
    #[strum(serialize = "circles")]
    Circles,
    #[strum(serialize = "rectangles")]
    Rectangles,
    #[strum(serialize = "timers")]
    Timers,
}

impl Component {
    pub fn c_type(self) -> &'static str {
        match self {
            Component::Registry => "EntityRegistry",
            Component::Transforms => "TransformArray",
            Component::Renderables => "RenderableArray",
            Component::Circles => "CircleArray",
            Component::Rectangles => "RectangleArray",
            Component::Timers => "TimerArray",
        }
    }
}

/// GameState emission order.
pub const ALL: [Component; 6] = [
    Component::Registry,
    Component::Transforms,
    Component::Renderables,
    Component::Circles,
    Component::Rectangles,
    Component::Timers,
];

/// Collections handed to entity_create / entity_destroy, in call order.
/// Timers are engine-internal and never passed through.
pub const LIFECYCLE_ARGS: [Component; 5] = [
    Component::Registry,
    Component::Transforms,
    Component::Renderables,
    Component::Circles,
    Component::Rectangles,
];

/// Engine headers every generated artifact includes.
pub const HEADERS: [&str; 6] = [
    "entity.h",
    "transform.h",
    "renderable.h",
    "collision.h",
    "timer.h",
    "sprite.h",
];

// Engine ABI symbols.
pub const ENTITY_CREATE: &str = "entity_create";
pub const ENTITY_DESTROY: &str = "entity_destroy";
pub const ENTITY_SET_COLLISION: &str = "entity_set_collision";
pub const COLLISION_NONE: &str = "COLLISION_NONE";
pub const SPRITE_NONE: &str = "SPRITE_NONE";
/// Sentinel returned by entity_destroy when no identity was relocated.
pub const INVALID_ENTITY: &str = "INVALID_ENTITY";
pub const TRANSFORM_T: &str = "transform_t";
pub const RENDERABLE_T: &str = "Renderable";

#[test]
fn display_is_field_name() {
    assert_eq!(Component::Registry.to_string(), "registry");
    assert_eq!(Component::Transforms.to_string(), "transforms");
    assert_eq!(Component::Timers.to_string(), "timers");
}

#[test]
fn type_names_match_headers() {
    assert_eq!(Component::Registry.c_type(), "EntityRegistry");
    assert_eq!(Component::Rectangles.c_type(), "RectangleArray");
    assert_eq!(ALL.len(), 6);
    assert_eq!(LIFECYCLE_ARGS.len(), 5);
}
