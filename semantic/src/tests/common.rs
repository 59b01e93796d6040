use crate::{
    ClassId, Declaration, NodeId, NodeKind, SymbolDecl, SymbolId, SymbolTable, SyntaxTree,
    TreeBuilder, Ty,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// ```text
/// class Main extends Base {
///   int count;
///   String label;
///   List<String> items() { }
///   void run(int count) {
///     ArrayList<String> all;
///     { int inner; items ( ) . it }
///     int later;
///   }
/// }
/// ```
pub struct Sample {
    pub table: SymbolTable,
    pub tree: SyntaxTree,
    pub main: ClassId,
    /// The `it` identifier.
    pub caret: NodeId,
    /// `items().it`
    pub qualified: NodeId,
    /// `items`, the qualifier's own reference expression.
    pub callee: NodeId,
    pub count_param: SymbolId,
    pub count_field: SymbolId,
    pub list_size: SymbolId,
}

pub fn sample() -> Sample {
    init_tracing();
    let mut table = SymbolTable::with_prelude();
    let list = table.class_named("List").map(|def| def.id);
    let list_size = table.declare(SymbolDecl::method("size", Ty::int(), Vec::new()), list);
    table.declare(
        SymbolDecl::method("get", Ty::param("E"), vec![Ty::int()]),
        list,
    );

    let base = table.add_class("Base", "demo.Base", &[], Vec::new());
    table.declare(SymbolDecl::field("shared", Ty::int()), Some(base));
    table.declare(SymbolDecl::field("label", Ty::class("String")), Some(base));
    let main = table.add_class("Main", "demo.Main", &[], vec![Ty::class("Base")]);

    let mut b = TreeBuilder::new();
    b.start_node(NodeKind::Class);
    b.declare(Declaration::Class(main));
    b.token(NodeKind::Keyword, "class");
    b.token(NodeKind::Identifier, "Main");
    b.token(NodeKind::Punct, "{");

    let count_field = table.declare(SymbolDecl::field("count", Ty::int()), Some(main));
    variable(&mut b, NodeKind::Field, count_field, "int", "count");
    let label = table.declare(SymbolDecl::field("label", Ty::class("String")), Some(main));
    variable(&mut b, NodeKind::Field, label, "String", "label");

    let items = table.declare(
        SymbolDecl::method("items", Ty::generic("List", [Ty::class("String")]), Vec::new()),
        Some(main),
    );
    b.start_node(NodeKind::Method);
    b.declare(Declaration::Symbol(items));
    b.token(NodeKind::Identifier, "List<String>");
    b.token(NodeKind::Identifier, "items");
    b.token(NodeKind::Punct, "(");
    b.token(NodeKind::Punct, ")");
    b.start_node(NodeKind::Block);
    b.token(NodeKind::Punct, "{");
    b.token(NodeKind::Punct, "}");
    b.finish_node();
    b.finish_node();

    let run = table.declare(
        SymbolDecl::method("run", Ty::Void, vec![Ty::int()]),
        Some(main),
    );
    b.start_node(NodeKind::Method);
    b.declare(Declaration::Symbol(run));
    b.token(NodeKind::Keyword, "void");
    b.token(NodeKind::Identifier, "run");
    b.token(NodeKind::Punct, "(");
    let count_param = table.declare(SymbolDecl::parameter("count", Ty::int()), None);
    variable(&mut b, NodeKind::Parameter, count_param, "int", "count");
    b.token(NodeKind::Punct, ")");
    b.start_node(NodeKind::Block);
    b.token(NodeKind::Punct, "{");
    let all = table.declare(
        SymbolDecl::local("all", Ty::generic("ArrayList", [Ty::class("String")])),
        None,
    );
    variable(&mut b, NodeKind::LocalVariable, all, "ArrayList<String>", "all");

    b.start_node(NodeKind::Block);
    b.token(NodeKind::Punct, "{");
    let inner = table.declare(SymbolDecl::local("inner", Ty::int()), None);
    variable(&mut b, NodeKind::LocalVariable, inner, "int", "inner");
    b.start_node(NodeKind::ExpressionStatement);
    let qualified = b.start_node(NodeKind::ReferenceExpression);
    b.start_node(NodeKind::MethodCall);
    let callee = b.start_node(NodeKind::ReferenceExpression);
    b.token(NodeKind::Identifier, "items");
    b.finish_node();
    b.token(NodeKind::Punct, "(");
    b.token(NodeKind::Punct, ")");
    b.finish_node();
    b.token(NodeKind::Punct, ".");
    let caret = b.token(NodeKind::Identifier, "it");
    b.finish_node();
    b.finish_node();
    b.token(NodeKind::Punct, "}");
    b.finish_node();

    let later = table.declare(SymbolDecl::local("later", Ty::int()), None);
    variable(&mut b, NodeKind::LocalVariable, later, "int", "later");
    b.token(NodeKind::Punct, "}");
    b.finish_node();
    b.finish_node();

    b.token(NodeKind::Punct, "}");
    b.finish_node();

    Sample {
        table,
        tree: b.finish(),
        main,
        caret,
        qualified,
        callee,
        count_param,
        count_field,
        list_size,
    }
}

fn variable(b: &mut TreeBuilder, kind: NodeKind, symbol: SymbolId, ty: &str, name: &str) {
    b.start_node(kind);
    b.declare(Declaration::Symbol(symbol));
    b.token(NodeKind::Identifier, ty);
    b.token(NodeKind::Identifier, name);
    if kind != NodeKind::Parameter {
        b.token(NodeKind::Punct, ";");
    }
    b.finish_node();
}
