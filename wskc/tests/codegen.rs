use wskc::codegen::{Artifacts, CodeGen};
use wskc::parser::Parser;
use wskc::scanner::Scanner;

fn generate(code: &str) -> Artifacts {
    let tokens = Scanner::new(code).scan().expect("scan failed");
    let program = Parser::new(tokens.into_iter())
        .parse()
        .expect("parse failed");
    CodeGen::generate(&program)
}

/// Body of the named function inside the definitions artifact
fn function_body<'a>(source: &'a str, signature: &str) -> &'a str {
    let start = source
        .find(signature)
        .unwrap_or_else(|| panic!("missing function: {signature}"));
    let end = source[start..]
        .find("\n}\n")
        .map(|idx| start + idx + 2)
        .unwrap_or(source.len());
    &source[start..end]
}

#[test]
fn header_guard_and_includes() {
    let a = generate("entity Rat { }");
    assert!(a.header.starts_with("#ifndef GAME_GENERATED_H\n#define GAME_GENERATED_H\n"));
    assert!(a.header.trim_end().ends_with("#endif"));
    for include in [
        "#include <stdint.h>",
        "#include <stdbool.h>",
        "#include <stdlib.h>",
        "#include \"entity.h\"",
        "#include \"transform.h\"",
        "#include \"renderable.h\"",
        "#include \"collision.h\"",
        "#include \"timer.h\"",
        "#include \"sprite.h\"",
    ] {
        assert!(a.header.contains(include), "missing {include}");
    }
}

#[test]
fn record_carries_identity_then_fields() {
    let a = generate("entity Rat { float hsp; int lives; bool alive; uint32 flags; }");
    assert!(a.header.contains(
        "typedef struct Rat {\n    uint32_t entity_id;\n    float hsp;\n    int lives;\n    bool alive;\n    uint32_t flags;\n} Rat;"
    ));
    assert!(a.header.contains(
        "typedef struct RatArray {\n    Rat* data;\n    int count;\n    int capacity;\n} RatArray;"
    ));
}

#[test]
fn game_state_lists_engine_components_then_arrays() {
    let a = generate("entity Rat { } entity Snake { }");
    let start = a.header.find("typedef struct GameState {").expect("GameState");
    let end = a.header[start..].find("} GameState;").expect("GameState end") + start;
    let body = &a.header[start..end];

    for field in [
        "EntityRegistry registry;",
        "TransformArray transforms;",
        "RenderableArray renderables;",
        "CircleArray circles;",
        "RectangleArray rectangles;",
        "TimerArray timers;",
        "RatArray rats;",
        "SnakeArray snakes;",
    ] {
        assert!(body.contains(field), "missing {field}");
    }
    // engine components precede the entity arrays
    assert!(body.find("TimerArray timers;").unwrap() < body.find("RatArray rats;").unwrap());
    assert!(body.find("RatArray rats;").unwrap() < body.find("SnakeArray snakes;").unwrap());
}

#[test]
fn update_and_destroy_suppressed_without_blocks() {
    let a = generate("entity Rat { float hsp; on_create { self.hsp = 1; } }");
    assert!(a.header.contains("uint32_t rat_create(GameState* game, float x, float y);"));
    assert!(!a.header.contains("rat_update"));
    assert!(!a.header.contains("rat_destroy"));
    assert!(a.source.contains("uint32_t rat_create(GameState* game, float x, float y) {"));
    assert!(!a.source.contains("rat_update"));
    assert!(!a.source.contains("rat_destroy"));
}

#[test]
fn rat_example_end_to_end() {
    let a = generate(
        "entity Rat { float hsp; on_create { self.hsp = 1; } } game { spawn Rat(5, 5); }",
    );
    assert!(a.header.contains("typedef struct Rat {\n    uint32_t entity_id;\n    float hsp;\n} Rat;"));
    assert!(a.header.contains("typedef struct RatArray"));
    assert!(a.header.contains("RatArray rats;"));
    // the on_create assignment is translated against the bound record
    assert!(a.source.contains("entity->hsp = 1;"));
    // the spawn directive lowers into game_init
    let init = function_body(&a.source, "void game_init(GameState* game) {");
    assert!(init.contains("rat_create(game, 5, 5);"));
}

#[test]
fn create_wires_engine_defaults_and_zeroes_fields() {
    let a = generate("entity Rat { float hsp; bool alive; }");
    let create = function_body(&a.source, "uint32_t rat_create(GameState* game, float x, float y) {");
    assert!(create.contains(
        "uint32_t entity_id = entity_create(&game->registry, &game->transforms, &game->renderables, &game->circles, &game->rectangles);"
    ));
    assert!(create.contains("entity_set_collision(&game->registry, entity_id, COLLISION_NONE);"));
    assert!(create.contains(".x = x, .y = y,"));
    assert!(create.contains(".current_sprite_id = SPRITE_NONE,"));
    // doubling growth from the seed capacity
    assert!(create.contains("game->rats.capacity = game->rats.capacity == 0 ? 8 : game->rats.capacity * 2;"));
    assert!(create.contains("game->rats.data = realloc(game->rats.data, sizeof(Rat) * game->rats.capacity);"));
    // append with identity set and declared fields zeroed
    assert!(create.contains(".entity_id = entity_id"));
    assert!(create.contains(".hsp = 0"));
    assert!(create.contains(".alive = 0"));
    assert!(create.contains("return entity_id;"));
    // no on_create block, no record binding
    assert!(!create.contains("uint32_t eid"));
}

#[test]
fn update_lookup_soft_fails() {
    let a = generate("entity Rat { float hsp; on_update { self.hsp = self.hsp + 1; } }");
    let update = function_body(&a.source, "void rat_update(GameState* game, uint32_t entity_id) {");
    assert!(update.contains("Rat* entity = NULL;"));
    assert!(update.contains("if (game->rats.data[i].entity_id == entity_id) {"));
    assert!(update.contains("if (!entity) return;"));
    assert!(update.contains("uint32_t eid = entity_id;"));
    assert!(update.contains("entity->hsp = entity->hsp + 1;"));
}

#[test]
fn destroy_rewrites_relocated_identity_across_all_arrays() {
    let a = generate(
        "entity Rat { float hsp; on_destroy { print self.hsp; } } entity Snake { int length; }",
    );
    let destroy = function_body(&a.source, "void rat_destroy(GameState* game, uint32_t entity_id) {");
    // engine removal reports the relocated identity
    assert!(destroy.contains(
        "uint32_t moved_id = entity_destroy(&game->registry, &game->transforms, &game->renderables, &game->circles, &game->rectangles, entity_id);"
    ));
    // own-array swap-and-pop
    assert!(destroy.contains("game->rats.data[i] = game->rats.data[game->rats.count - 1];"));
    assert!(destroy.contains("game->rats.count--;"));
    // every entity array is rescanned, the other type included
    assert!(destroy.contains("if (moved_id != INVALID_ENTITY) {"));
    assert!(destroy.contains("if (game->rats.data[i].entity_id == moved_id) {"));
    assert!(destroy.contains("game->rats.data[i].entity_id = entity_id;"));
    assert!(destroy.contains("if (game->snakes.data[i].entity_id == moved_id) {"));
    assert!(destroy.contains("game->snakes.data[i].entity_id = entity_id;"));
}

#[test]
fn destroy_script_runs_before_removal() {
    let a = generate("entity Rat { float hsp; on_destroy { self.hsp = 0; } }");
    let destroy = function_body(&a.source, "void rat_destroy(GameState* game, uint32_t entity_id) {");
    let script = destroy.find("entity->hsp = 0;").expect("script");
    let removal = destroy.find("uint32_t moved_id = entity_destroy(").expect("removal");
    assert!(script < removal);
}

#[test]
fn program_functions_in_fixed_order() {
    let a = generate("entity Rat { on_update { } }");
    let init = a.source.find("void game_init(GameState* game) {").expect("init");
    let update = a.source.find("void game_update(GameState* game) {").expect("update");
    let cleanup = a.source.find("void game_cleanup(GameState* game) {").expect("cleanup");
    assert!(init < update && update < cleanup);

    assert!(a.source.contains("game->rats.data = malloc(sizeof(Rat) * 8);"));
    assert!(a.source.contains("game->rats.capacity = 8;"));
    assert!(a.source.contains("rat_update(game, game->rats.data[i].entity_id);"));
    assert!(a.source.contains("free(game->rats.data);"));
    assert!(a.source.contains("game->rats.data = NULL;"));
}

#[test]
fn program_update_skips_types_without_update() {
    let a = generate("entity Rat { } entity Snake { on_update { } }");
    let update = function_body(&a.source, "void game_update(GameState* game) {");
    assert!(!update.contains("rat_update"));
    assert!(update.contains("snake_update(game, game->snakes.data[i].entity_id);"));
}

#[test]
fn definitions_include_declarations() {
    let a = generate("entity Rat { }");
    assert!(a.source.starts_with("#include \"game_generated.h\"\n"));
}

#[test]
fn reserved_names_translate() {
    let a = generate(
        "entity Rat { on_update { transform.x = transform.x + 1; renderable.image_speed = 0.5; } }",
    );
    assert!(a.source.contains(
        "(&game->transforms.data[eid])->x = (&game->transforms.data[eid])->x + 1;"
    ));
    assert!(a.source.contains("(&game->renderables.data[eid])->image_speed = 0.5;"));
}

#[test]
fn collision_reference_is_marked_unsupported() {
    let a = generate("entity Rat { on_update { collision.radius = 4; } }");
    assert!(a.source.contains("/* collision - needs runtime type check */"));
}

#[test]
fn print_statements_are_dropped() {
    let a = generate("entity Rat { on_update { print 12345; } }");
    assert!(!a.source.contains("12345"));
    assert!(!a.source.contains("print"));
}

#[test]
fn control_flow_renders_with_braces() {
    let a = generate(
        "entity Rat { float hsp; on_update { if (self.hsp > 0) { self.hsp = 0; } else { self.hsp = 1; } while (self.hsp < 5) { self.hsp = self.hsp + 1; } } }",
    );
    assert!(a.source.contains("if (entity->hsp > 0) {"));
    assert!(a.source.contains("} else {"));
    assert!(a.source.contains("while (entity->hsp < 5) {"));
}

#[test]
fn var_declarations_render_as_float_locals() {
    let a = generate("entity Rat { float hsp; on_update { var boost = 2; self.hsp = boost; } }");
    assert!(a.source.contains("float boost = 2;"));
    assert!(a.source.contains("entity->hsp = boost;"));
}

#[test]
fn grouping_and_operators_render_verbatim() {
    let a = generate("entity Rat { float hsp; on_update { self.hsp = (self.hsp + 1) * -2; } }");
    assert!(a.source.contains("entity->hsp = (entity->hsp + 1) * -2;"));
}

#[test]
fn unsupported_call_gets_a_marker() {
    let a = generate("entity Rat { on_update { foo(1); } }");
    assert!(a.source.contains("/* unsupported expr */"));
}

#[test]
fn entities_emit_in_declaration_order() {
    let a = generate("entity Zebra { } entity Ant { }");
    assert!(a.header.find("typedef struct Zebra {").unwrap() < a.header.find("typedef struct Ant {").unwrap());
    assert!(a.source.find("zebra_create").unwrap() < a.source.find("ant_create").unwrap());
}

#[test]
fn fractional_spawn_coordinates() {
    let a = generate("entity Rat { } game { spawn Rat(1.5, 2); }");
    assert!(a.source.contains("rat_create(game, 1.5, 2);"));
}
