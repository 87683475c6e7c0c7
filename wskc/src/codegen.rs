// codegen.rs

use crate::ast::{EntityDecl, Expr, FieldType, Program, Stmt};
use crate::token::Literal;
use engine::component;

/// Seed capacity for every generated per-entity array.
const SEED_CAPACITY: usize = 8;

/// The two generated artifacts: type and function declarations, and the
/// function definitions that include them.
#[derive(Debug)]
pub struct Artifacts {
    pub header: String,
    pub source: String,
}

/// Growable emission buffer with an indent counter, 4-space units.
#[derive(Debug, Default)]
struct Buf {
    text: String,
    indent: usize,
}

impl Buf {
    fn push(&mut self, s: &str) {
        self.text.push_str(s);
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.text.push_str("    ");
        }
    }

    /// One full line at the current indent
    fn line(&mut self, s: &str) {
        self.pad();
        self.text.push_str(s);
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }
}

#[derive(Debug, Default)]
pub struct CodeGen {
    header: Buf,
    source: Buf,
}

impl CodeGen {
    /// Pure function of the program; writing the artifacts out is the
    /// caller's job.
    pub fn generate(program: &Program) -> Artifacts {
        let mut gen = CodeGen::default();
        gen.gen_header(program);
        gen.gen_source(program);
        Artifacts {
            header: gen.header.text,
            source: gen.source.text,
        }
    }

    // --------------------------------------------------------------------
    // Declarations artifact
    // --------------------------------------------------------------------

    fn gen_header(&mut self, program: &Program) {
        let out = &mut self.header;

        out.line("#ifndef GAME_GENERATED_H");
        out.line("#define GAME_GENERATED_H");
        out.blank();
        out.line("#include <stdint.h>");
        out.line("#include <stdbool.h>");
        out.line("#include <stdlib.h>");
        for header in component::HEADERS {
            out.line(&format!("#include \"{}\"", header));
        }
        out.blank();

        for entity in &program.entities {
            Self::entity_struct(out, entity);
            Self::entity_array(out, entity);
        }

        Self::game_state(out, program);

        for entity in &program.entities {
            let lower = lower_name(&entity.name);
            out.line(&format!(
                "uint32_t {}_create(GameState* game, float x, float y);",
                lower
            ));
            if entity.on_update.is_some() {
                out.line(&format!(
                    "void {}_update(GameState* game, uint32_t entity_id);",
                    lower
                ));
            }
            if entity.on_destroy.is_some() {
                out.line(&format!(
                    "void {}_destroy(GameState* game, uint32_t entity_id);",
                    lower
                ));
            }
        }
        out.blank();
        out.line("void game_init(GameState* game);");
        out.line("void game_update(GameState* game);");
        out.line("void game_cleanup(GameState* game);");
        out.blank();
        out.line("#endif");
    }

    /// Record type: implicit identity first, declared fields after
    fn entity_struct(out: &mut Buf, entity: &EntityDecl) {
        out.line(&format!("typedef struct {} {{", entity.name));
        out.indent += 1;
        out.line("uint32_t entity_id;");
        for field in &entity.fields {
            out.line(&format!("{} {};", c_type(field.ty), field.name));
        }
        out.indent -= 1;
        out.line(&format!("}} {};", entity.name));
        out.blank();
    }

    fn entity_array(out: &mut Buf, entity: &EntityDecl) {
        out.line(&format!("typedef struct {}Array {{", entity.name));
        out.indent += 1;
        out.line(&format!("{}* data;", entity.name));
        out.line("int count;");
        out.line("int capacity;");
        out.indent -= 1;
        out.line(&format!("}} {}Array;", entity.name));
        out.blank();
    }

    fn game_state(out: &mut Buf, program: &Program) {
        out.line("typedef struct GameState {");
        out.indent += 1;
        out.line("// Engine components");
        for comp in component::ALL {
            out.line(&format!("{} {};", comp.c_type(), comp));
        }
        out.blank();
        out.line("// Game entity arrays");
        for entity in &program.entities {
            out.line(&format!(
                "{}Array {}s;",
                entity.name,
                lower_name(&entity.name)
            ));
        }
        out.indent -= 1;
        out.line("} GameState;");
        out.blank();
    }

    // --------------------------------------------------------------------
    // Definitions artifact
    // --------------------------------------------------------------------

    fn gen_source(&mut self, program: &Program) {
        self.source.line("#include \"game_generated.h\"");
        self.source.blank();

        for entity in &program.entities {
            self.entity_create(entity);
            self.entity_update(entity);
            self.entity_destroy(entity, &program.entities);
        }

        self.game_init(program);
        self.game_update(program);
        self.game_cleanup(program);
    }

    fn entity_create(&mut self, entity: &EntityDecl) {
        let out = &mut self.source;
        let lower = lower_name(&entity.name);

        out.line(&format!(
            "uint32_t {}_create(GameState* game, float x, float y) {{",
            lower
        ));
        out.indent += 1;

        out.line(&format!(
            "uint32_t entity_id = {}({});",
            component::ENTITY_CREATE,
            lifecycle_args()
        ));
        out.blank();
        out.line(&format!(
            "{}(&game->registry, entity_id, {});",
            component::ENTITY_SET_COLLISION,
            component::COLLISION_NONE
        ));
        out.blank();

        out.line(&format!(
            "game->transforms.data[entity_id] = ({}){{",
            component::TRANSFORM_T
        ));
        out.indent += 1;
        out.line(".x = x, .y = y,");
        out.line(".image_xscale = 1.0f, .image_yscale = 1.0f,");
        out.line(".up = 1, .right = 1, .rotation_rad = 0.0f");
        out.indent -= 1;
        out.line("};");
        out.blank();

        out.line(&format!(
            "game->renderables.data[entity_id] = ({}){{",
            component::RENDERABLE_T
        ));
        out.indent += 1;
        out.line(&format!(".current_sprite_id = {},", component::SPRITE_NONE));
        out.line(".image_index = 0,");
        out.line(".frame_counter = 0.0f,");
        out.line(".image_speed = 0.0f");
        out.indent -= 1;
        out.line("};");
        out.blank();

        out.line(&format!(
            "if (game->{0}s.count >= game->{0}s.capacity) {{",
            lower
        ));
        out.indent += 1;
        out.line(&format!(
            "game->{0}s.capacity = game->{0}s.capacity == 0 ? {1} : game->{0}s.capacity * 2;",
            lower, SEED_CAPACITY
        ));
        out.line(&format!(
            "game->{0}s.data = realloc(game->{0}s.data, sizeof({1}) * game->{0}s.capacity);",
            lower, entity.name
        ));
        out.indent -= 1;
        out.line("}");
        out.blank();

        out.line(&format!(
            "game->{0}s.data[game->{0}s.count++] = ({1}){{",
            lower, entity.name
        ));
        out.indent += 1;
        out.pad();
        out.push(".entity_id = entity_id");
        for field in &entity.fields {
            out.push(",\n");
            out.pad();
            out.push(&format!(".{} = 0", field.name));
        }
        out.push("\n");
        out.indent -= 1;
        out.line("};");
        out.blank();

        if let Some(block) = &entity.on_create {
            out.line("// on_create");
            out.line(&format!(
                "{0}* entity = &game->{1}s.data[game->{1}s.count - 1];",
                entity.name, lower
            ));
            out.line("uint32_t eid = entity->entity_id;  // For component access");
            Self::stmt(out, block);
        }

        out.line("return entity_id;");
        out.indent -= 1;
        out.line("}");
        out.blank();
    }

    fn entity_update(&mut self, entity: &EntityDecl) {
        let Some(block) = &entity.on_update else {
            return;
        };
        let out = &mut self.source;
        let lower = lower_name(&entity.name);

        out.line(&format!(
            "void {}_update(GameState* game, uint32_t entity_id) {{",
            lower
        ));
        out.indent += 1;

        // An id no longer backed by a record is a silent no-op
        Self::find_record(out, entity, &lower);
        out.line("if (!entity) return;");
        out.blank();
        out.line("uint32_t eid = entity_id;");
        out.blank();
        out.line("// on_update");
        Self::stmt(out, block);

        out.indent -= 1;
        out.line("}");
        out.blank();
    }

    fn entity_destroy(&mut self, entity: &EntityDecl, all: &[EntityDecl]) {
        let Some(block) = &entity.on_destroy else {
            return;
        };
        let out = &mut self.source;
        let lower = lower_name(&entity.name);

        out.line(&format!(
            "void {}_destroy(GameState* game, uint32_t entity_id) {{",
            lower
        ));
        out.indent += 1;

        // Script runs before any structural mutation
        Self::find_record(out, entity, &lower);
        out.line("if (!entity) return;");
        out.blank();
        out.line("uint32_t eid = entity_id;");
        out.blank();
        out.line("// on_destroy");
        Self::stmt(out, block);
        out.blank();

        // Engine-side swap-and-pop; reports the identity moved into the
        // freed registry slot, or INVALID_ENTITY
        out.line(&format!(
            "uint32_t moved_id = {}({}, entity_id);",
            component::ENTITY_DESTROY,
            lifecycle_args()
        ));
        out.blank();

        // Same swap-and-pop on this entity's own array
        out.line(&format!("for (int i = 0; i < game->{}s.count; i++) {{", lower));
        out.indent += 1;
        out.line(&format!(
            "if (game->{}s.data[i].entity_id == entity_id) {{",
            lower
        ));
        out.indent += 1;
        out.line(&format!(
            "game->{0}s.data[i] = game->{0}s.data[game->{0}s.count - 1];",
            lower
        ));
        out.line(&format!("game->{}s.count--;", lower));
        out.line("break;");
        out.indent -= 1;
        out.line("}");
        out.indent -= 1;
        out.line("}");
        out.blank();

        // The relocated identity now lives in the freed registry slot;
        // every entity array must remap it, whichever type holds it
        out.line(&format!(
            "if (moved_id != {}) {{",
            component::INVALID_ENTITY
        ));
        out.indent += 1;
        for other in all {
            let other_lower = lower_name(&other.name);
            out.line(&format!(
                "for (int i = 0; i < game->{}s.count; i++) {{",
                other_lower
            ));
            out.indent += 1;
            out.line(&format!(
                "if (game->{}s.data[i].entity_id == moved_id) {{",
                other_lower
            ));
            out.indent += 1;
            out.line(&format!(
                "game->{}s.data[i].entity_id = entity_id;",
                other_lower
            ));
            out.indent -= 1;
            out.line("}");
            out.indent -= 1;
            out.line("}");
        }
        out.indent -= 1;
        out.line("}");

        out.indent -= 1;
        out.line("}");
        out.blank();
    }

    /// Linear scan binding `entity` to the record carrying entity_id
    fn find_record(out: &mut Buf, entity: &EntityDecl, lower: &str) {
        out.line(&format!("{}* entity = NULL;", entity.name));
        out.line(&format!("for (int i = 0; i < game->{}s.count; i++) {{", lower));
        out.indent += 1;
        out.line(&format!(
            "if (game->{}s.data[i].entity_id == entity_id) {{",
            lower
        ));
        out.indent += 1;
        out.line(&format!("entity = &game->{}s.data[i];", lower));
        out.line("break;");
        out.indent -= 1;
        out.line("}");
        out.indent -= 1;
        out.line("}");
    }

    fn game_init(&mut self, program: &Program) {
        let out = &mut self.source;

        out.line("void game_init(GameState* game) {");
        out.indent += 1;
        for (idx, entity) in program.entities.iter().enumerate() {
            if idx > 0 {
                out.blank();
            }
            let lower = lower_name(&entity.name);
            out.line(&format!(
                "game->{0}s.data = malloc(sizeof({1}) * {2});",
                lower, entity.name, SEED_CAPACITY
            ));
            out.line(&format!("game->{}s.count = 0;", lower));
            out.line(&format!("game->{}s.capacity = {};", lower, SEED_CAPACITY));
        }
        if let Some(game) = &program.game {
            if !game.spawns.is_empty() {
                out.blank();
                for spawn in &game.spawns {
                    out.line(&format!(
                        "{}_create(game, {}, {});",
                        lower_name(&spawn.entity),
                        spawn.x,
                        spawn.y
                    ));
                }
            }
        }
        out.indent -= 1;
        out.line("}");
        out.blank();
    }

    fn game_update(&mut self, program: &Program) {
        let out = &mut self.source;

        out.line("void game_update(GameState* game) {");
        out.indent += 1;
        // Index loop on purpose: an update body may destroy entities and
        // swap-and-pop this same array mid-iteration
        for entity in &program.entities {
            if entity.on_update.is_none() {
                continue;
            }
            let lower = lower_name(&entity.name);
            out.line(&format!("for (int i = 0; i < game->{}s.count; i++) {{", lower));
            out.indent += 1;
            out.line(&format!(
                "{0}_update(game, game->{0}s.data[i].entity_id);",
                lower
            ));
            out.indent -= 1;
            out.line("}");
        }
        out.indent -= 1;
        out.line("}");
        out.blank();
    }

    fn game_cleanup(&mut self, program: &Program) {
        let out = &mut self.source;

        out.line("void game_cleanup(GameState* game) {");
        out.indent += 1;
        for entity in &program.entities {
            let lower = lower_name(&entity.name);
            out.line(&format!("free(game->{}s.data);", lower));
            out.line(&format!("game->{}s.data = NULL;", lower));
            out.line(&format!("game->{}s.count = 0;", lower));
            out.line(&format!("game->{}s.capacity = 0;", lower));
        }
        out.indent -= 1;
        out.line("}");
    }

    // --------------------------------------------------------------------
    // Statement and expression translation
    // --------------------------------------------------------------------

    fn stmt(out: &mut Buf, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => {
                out.pad();
                Self::expr(out, expr);
                out.push(";\n");
            }
            Stmt::Var(name, initializer) => {
                out.pad();
                // Script locals have no declared type; float covers the
                // arithmetic the scripts do
                out.push("float ");
                out.push(name);
                if let Some(init) = initializer {
                    out.push(" = ");
                    Self::expr(out, init);
                }
                out.push(";\n");
            }
            Stmt::Block(statements) => {
                for statement in statements {
                    Self::stmt(out, statement);
                }
            }
            Stmt::Print(_) => {
                // Diagnostic-only in the script language; nothing is
                // emitted at runtime
            }
            Stmt::If(condition, then_branch, else_branch) => {
                out.pad();
                out.push("if (");
                Self::expr(out, condition);
                out.push(") {\n");
                out.indent += 1;
                Self::stmt(out, then_branch);
                out.indent -= 1;
                if let Some(else_branch) = else_branch {
                    out.line("} else {");
                    out.indent += 1;
                    Self::stmt(out, else_branch);
                    out.indent -= 1;
                }
                out.line("}");
            }
            Stmt::While(condition, body) => {
                out.pad();
                out.push("while (");
                Self::expr(out, condition);
                out.push(") {\n");
                out.indent += 1;
                Self::stmt(out, body);
                out.indent -= 1;
                out.line("}");
            }
        }
    }

    fn expr(out: &mut Buf, expr: &Expr) {
        match expr {
            Expr::Literal(Literal::Number(n)) => out.push(&format!("{}", n)),
            Expr::Literal(Literal::Text(s)) => out.push(&format!("\"{}\"", s)),
            Expr::Literal(Literal::Boolean(b)) => out.push(if *b { "true" } else { "false" }),
            Expr::Literal(Literal::None) => {}
            Expr::Variable(name) => match name.as_str() {
                "self" => out.push("entity"),
                "transform" => out.push("(&game->transforms.data[eid])"),
                "renderable" => out.push("(&game->renderables.data[eid])"),
                "collision" => out.push("/* collision - needs runtime type check */"),
                // Free identifiers pass through untouched and must
                // resolve in the emission context
                _ => out.push(name),
            },
            Expr::Binary(left, op, right) => {
                Self::expr(out, left);
                out.push(&format!(" {} ", op.lexeme()));
                Self::expr(out, right);
            }
            Expr::Unary(op, right) => {
                out.push(op.lexeme());
                Self::expr(out, right);
            }
            Expr::Grouping(inner) => {
                out.push("(");
                Self::expr(out, inner);
                out.push(")");
            }
            Expr::Assign(name, value) => {
                out.push(name);
                out.push(" = ");
                Self::expr(out, value);
            }
            Expr::Get(object, name) => {
                Self::expr(out, object);
                out.push(&format!("->{}", name));
            }
            Expr::Set(object, name, value) => {
                Self::expr(out, object);
                out.push(&format!("->{} = ", name));
                Self::expr(out, value);
            }
            Expr::Call(_, _) => out.push("/* unsupported expr */"),
        }
    }
}

fn c_type(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Float => "float",
        FieldType::Int => "int",
        FieldType::Bool => "bool",
        FieldType::Uint32 => "uint32_t",
    }
}

/// Generated symbols derive from the declared name lower-cased; the
/// record type keeps the declared spelling
fn lower_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn lifecycle_args() -> String {
    component::LIFECYCLE_ARGS
        .iter()
        .map(|comp| format!("&game->{}", comp))
        .collect::<Vec<_>>()
        .join(", ")
}
