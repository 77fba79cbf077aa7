//! Typed view over the syntax tree.
//!
//! Each wrapper holds a `SyntaxNode` of one kind and exposes its parts by
//! name (`condition`, `left`, `operator`, ...), so tools can query the tree
//! without positional guessing. Wrappers are cheap to create and never own
//! data beyond the node handle.

use rowan::NodeOrToken;
use smol_str::SmolStr;

use crate::syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed wrapper around a [`SyntaxNode`].
pub trait AstNode: Sized {
    /// Returns `true` if nodes of `kind` can be wrapped by this type.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// Wraps `node` if it has a matching kind.
    fn cast(node: SyntaxNode) -> Option<Self>;

    /// Returns the underlying syntax node.
    fn syntax(&self) -> &SyntaxNode;

    /// Returns the byte range of the node.
    fn range(&self) -> text_size::TextRange {
        self.syntax().text_range()
    }

    /// Returns the source text covered by the node.
    fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    /// Returns the comments attached to this node.
    ///
    /// These are the comments directly preceding the node (no blank line in
    /// between) followed by a comment on the same line after it.
    fn comments(&self) -> Vec<SyntaxToken> {
        let mut comments = leading_comments(self.syntax());
        comments.extend(trailing_comment(self.syntax()));
        comments
    }
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then_some(Self { syntax: node })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[allow(missing_docs)]
                $variant($variant),
            )*
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                $($variant::can_cast(kind))||*
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                $(
                    if $variant::can_cast(node.kind()) {
                        return $variant::cast(node).map(Self::$variant);
                    }
                )*
                None
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(node) => node.syntax(),)*
                }
            }
        }
    };
}

// =============================================================================
// Navigation helpers
// =============================================================================

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

fn nth_child<N: AstNode>(parent: &SyntaxNode, n: usize) -> Option<N> {
    children(parent).nth(n)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| token.kind() == kind)
}

/// First direct child token that is not trivia.
fn first_significant_token(parent: &SyntaxNode) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| !token.kind().is_trivia())
}

/// First child node castable to `N` that follows a direct `marker` token.
fn child_after<N: AstNode>(parent: &SyntaxNode, marker: SyntaxKind) -> Option<N> {
    parent
        .children_with_tokens()
        .skip_while(|element| element.kind() != marker)
        .filter_map(NodeOrToken::into_node)
        .find_map(N::cast)
}

/// Child nodes castable to `N` that precede the first direct `marker` token.
fn children_before<N: AstNode>(parent: &SyntaxNode, marker: SyntaxKind) -> Vec<N> {
    parent
        .children_with_tokens()
        .take_while(|element| element.kind() != marker)
        .filter_map(NodeOrToken::into_node)
        .filter_map(N::cast)
        .collect()
}

fn leading_comments(node: &SyntaxNode) -> Vec<SyntaxToken> {
    let mut comments = Vec::new();
    let mut current: SyntaxElement = node.clone().into();
    loop {
        let Some(prev) = current.prev_sibling_or_token() else {
            match current.parent() {
                Some(parent) => {
                    current = parent.into();
                    continue;
                }
                None => break,
            }
        };
        match &prev {
            NodeOrToken::Token(token) if token.kind().is_comment() => {
                comments.push(token.clone());
            }
            NodeOrToken::Token(token)
                if token.kind() == SyntaxKind::Whitespace
                    && token.text().matches('\n').count() < 2 => {}
            _ => break,
        }
        current = prev;
    }
    comments.reverse();
    comments
}

fn trailing_comment(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut current: SyntaxElement = node.clone().into();
    loop {
        let Some(next) = current.next_sibling_or_token() else {
            current = current.parent()?.into();
            continue;
        };
        match &next {
            NodeOrToken::Token(token) if token.kind().is_comment() => {
                return Some(token.clone());
            }
            NodeOrToken::Token(token)
                if token.kind() == SyntaxKind::Semicolon
                    || (token.kind() == SyntaxKind::Whitespace && !token.text().contains('\n')) => {}
            _ => return None,
        }
        current = next;
    }
}

// =============================================================================
// Source file
// =============================================================================

/// How a source unit was parsed at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// One or more declarations.
    Declarations,
    /// A single bare statement block.
    Block,
}

ast_node!(
    /// Root of every parse.
    SourceFile => SourceFile
);

impl SourceFile {
    pub(crate) fn from_root(syntax: SyntaxNode) -> Self {
        Self { syntax }
    }

    /// Returns which top-level mode the parser selected.
    #[must_use]
    pub fn mode(&self) -> SourceMode {
        if self.block().is_some() {
            SourceMode::Block
        } else {
            SourceMode::Declarations
        }
    }

    /// Top-level declarations, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = Declaration> {
        children(&self.syntax)
    }

    /// The bare block, in block mode.
    #[must_use]
    pub fn block(&self) -> Option<Block> {
        child(&self.syntax)
    }

    /// Pragmas between top-level declarations.
    pub fn pragmas(&self) -> impl Iterator<Item = Pragma> {
        children(&self.syntax)
    }

    /// Every comment in the file, in source order.
    #[must_use]
    pub fn comments(&self) -> Vec<SyntaxToken> {
        self.syntax
            .descendants_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .filter(|token| token.kind().is_comment())
            .collect()
    }
}

// =============================================================================
// Declarations
// =============================================================================

ast_node!(
    /// `FUNCTION_BLOCK name ... END_FUNCTION_BLOCK`
    FunctionBlockDeclaration => FunctionBlockDeclaration
);
ast_node!(
    /// `FUNCTION name [: type] ... END_FUNCTION`
    FunctionDeclaration => FunctionDeclaration
);
ast_node!(
    /// `PROGRAM name ... END_PROGRAM`
    ProgramDeclaration => ProgramDeclaration
);
ast_node!(
    /// `TYPE name : STRUCT ... END_STRUCT END_TYPE`
    TypeDeclaration => TypeDeclaration
);

ast_enum!(
    /// A top-level declaration.
    Declaration {
        FunctionBlockDeclaration,
        FunctionDeclaration,
        ProgramDeclaration,
        TypeDeclaration,
    }
);

macro_rules! pou_accessors {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// The declared name.
                #[must_use]
                pub fn name(&self) -> Option<Identifier> {
                    child(&self.syntax)
                }

                /// Variable sections, in source order.
                pub fn var_sections(&self) -> impl Iterator<Item = VarSection> {
                    children(&self.syntax)
                }

                /// Pragmas placed between the header and the body.
                pub fn pragmas(&self) -> impl Iterator<Item = Pragma> {
                    children(&self.syntax)
                }

                /// The statement body, if any statements are present.
                #[must_use]
                pub fn body(&self) -> Option<Block> {
                    child(&self.syntax)
                }
            }
        )*
    };
}

pou_accessors!(FunctionBlockDeclaration, FunctionDeclaration, ProgramDeclaration);

impl FunctionDeclaration {
    /// The declared return type.
    #[must_use]
    pub fn return_type(&self) -> Option<TypeName> {
        child_after(&self.syntax, SyntaxKind::Colon)
    }
}

impl Declaration {
    /// The declared name.
    #[must_use]
    pub fn name(&self) -> Option<Identifier> {
        child(self.syntax())
    }
}

impl TypeDeclaration {
    /// The declared type name.
    #[must_use]
    pub fn name(&self) -> Option<Identifier> {
        child(&self.syntax)
    }

    /// The struct definition.
    #[must_use]
    pub fn struct_definition(&self) -> Option<StructDefinition> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `STRUCT ... END_STRUCT`
    StructDefinition => StructDefinition
);

impl StructDefinition {
    /// Fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = StructField> {
        children(&self.syntax)
    }
}

ast_node!(
    /// `name : type [:= init];` inside a struct
    StructField => StructField
);

impl StructField {
    /// The field name.
    #[must_use]
    pub fn name(&self) -> Option<Identifier> {
        child(&self.syntax)
    }

    /// The field type.
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        child_after(&self.syntax, SyntaxKind::Colon)
    }

    /// The default value.
    #[must_use]
    pub fn initializer(&self) -> Option<Expr> {
        child_after(&self.syntax, SyntaxKind::Assign)
    }

    /// Pragmas before the field or between its tokens.
    pub fn pragmas(&self) -> impl Iterator<Item = Pragma> {
        children(&self.syntax)
    }
}

/// The nine variable section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarSectionKind {
    /// `VAR`
    Var,
    /// `VAR_INPUT`
    Input,
    /// `VAR_OUTPUT`
    Output,
    /// `VAR_IN_OUT`
    InOut,
    /// `VAR_TEMP`
    Temp,
    /// `VAR_STATIC`
    Static,
    /// `VAR_GLOBAL`
    Global,
    /// `VAR_EXTERNAL`
    External,
    /// `VAR CONSTANT`
    Constant,
}

ast_node!(
    /// `VAR ... END_VAR` and its variants
    VarSection => VarSection
);

impl VarSection {
    /// Returns the section kind.
    ///
    /// `VAR CONSTANT` is its own kind; `CONSTANT` after any other keyword
    /// keeps that keyword's kind and shows up in [`Self::is_constant`].
    #[must_use]
    pub fn kind(&self) -> Option<VarSectionKind> {
        let keyword = first_significant_token(&self.syntax)?;
        Some(match keyword.kind() {
            SyntaxKind::KwVar if self.is_constant() => VarSectionKind::Constant,
            SyntaxKind::KwVar => VarSectionKind::Var,
            SyntaxKind::KwVarInput => VarSectionKind::Input,
            SyntaxKind::KwVarOutput => VarSectionKind::Output,
            SyntaxKind::KwVarInOut => VarSectionKind::InOut,
            SyntaxKind::KwVarTemp => VarSectionKind::Temp,
            SyntaxKind::KwVarStatic => VarSectionKind::Static,
            SyntaxKind::KwVarGlobal => VarSectionKind::Global,
            SyntaxKind::KwVarExternal => VarSectionKind::External,
            _ => return None,
        })
    }

    /// Returns `true` if the section carries the `CONSTANT` qualifier.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        token(&self.syntax, SyntaxKind::KwConstant).is_some()
    }

    /// Variable declarations, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = VarDecl> {
        children(&self.syntax)
    }

    /// Pragmas not attached to a declaration.
    pub fn pragmas(&self) -> impl Iterator<Item = Pragma> {
        children(&self.syntax)
    }
}

ast_node!(
    /// `name[, name]* : type [:= init];`
    VarDecl => VarDecl
);

impl VarDecl {
    /// All declared names.
    #[must_use]
    pub fn names(&self) -> Vec<Identifier> {
        children_before(&self.syntax, SyntaxKind::Colon)
    }

    /// The first declared name.
    #[must_use]
    pub fn name(&self) -> Option<Identifier> {
        child(&self.syntax)
    }

    /// The declared type.
    #[must_use]
    pub fn type_name(&self) -> Option<TypeName> {
        child_after(&self.syntax, SyntaxKind::Colon)
    }

    /// The initial value.
    #[must_use]
    pub fn initializer(&self) -> Option<Expr> {
        child_after(&self.syntax, SyntaxKind::Assign)
    }

    /// Pragmas before the declaration or between its tokens.
    pub fn pragmas(&self) -> impl Iterator<Item = Pragma> {
        children(&self.syntax)
    }
}

ast_node!(
    /// `ARRAY [ranges] OF element`
    ArrayType => ArrayType
);

impl ArrayType {
    /// Dimensions, in source order.
    pub fn ranges(&self) -> impl Iterator<Item = ArrayRange> {
        children(&self.syntax)
    }

    /// The element type, itself possibly an array.
    #[must_use]
    pub fn element_type(&self) -> Option<TypeName> {
        child_after(&self.syntax, SyntaxKind::KwOf)
    }
}

ast_node!(
    /// `lo..hi`
    ArrayRange => ArrayRange
);

impl ArrayRange {
    /// Lower bound.
    #[must_use]
    pub fn start(&self) -> Option<Expr> {
        nth_child(&self.syntax, 0)
    }

    /// Upper bound.
    #[must_use]
    pub fn end(&self) -> Option<Expr> {
        nth_child(&self.syntax, 1)
    }
}

ast_enum!(
    /// A type reference.
    TypeName {
        Identifier,
        ArrayType,
    }
);

// =============================================================================
// Statements
// =============================================================================

ast_node!(
    /// Ordered run of statements, noops and pragmas.
    Block => Block
);
ast_node!(
    /// A bare `;`.
    Noop => Noop
);
ast_node!(
    /// `{ ... }` in a syntactic position.
    Pragma => PragmaItem
);

impl Pragma {
    /// The pragma token, braces included.
    #[must_use]
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.syntax, SyntaxKind::Pragma)
    }

    /// The text between the braces, trimmed.
    #[must_use]
    pub fn content(&self) -> Option<SmolStr> {
        let token = self.token()?;
        let text = token.text();
        let inner = text.strip_prefix('{')?.strip_suffix('}')?;
        Some(SmolStr::new(inner.trim()))
    }
}

ast_enum!(
    /// An executable statement.
    Stmt {
        Assignment,
        FbInvocation,
        IfStatement,
        CaseStatement,
        ReturnStatement,
    }
);

ast_enum!(
    /// One entry of a [`Block`].
    BlockItem {
        Assignment,
        FbInvocation,
        IfStatement,
        CaseStatement,
        ReturnStatement,
        Noop,
        Pragma,
    }
);

impl Block {
    /// Entries in execution order.
    pub fn items(&self) -> impl Iterator<Item = BlockItem> {
        children(&self.syntax)
    }

    /// Statements in execution order, without noops and pragmas.
    pub fn statements(&self) -> impl Iterator<Item = Stmt> {
        children(&self.syntax)
    }
}

ast_node!(
    /// `target := expression`
    Assignment => Assignment
);

impl Assignment {
    /// The assigned variable: an identifier or qualified identifier.
    #[must_use]
    pub fn target(&self) -> Option<Expr> {
        nth_child(&self.syntax, 0)
    }

    /// The assigned value.
    #[must_use]
    pub fn expression(&self) -> Option<Expr> {
        child_after(&self.syntax, SyntaxKind::Assign)
    }
}

ast_node!(
    /// `fb(args)` as a statement
    FbInvocation => FbInvocation
);

impl FbInvocation {
    /// The invoked instance.
    #[must_use]
    pub fn name(&self) -> Option<Expr> {
        nth_child(&self.syntax, 0)
    }

    /// The argument list.
    #[must_use]
    pub fn arguments(&self) -> Option<ArgumentList> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `IF cond THEN ... [ELSIF ...] [ELSE ...] END_IF`
    IfStatement => IfStatement
);

impl IfStatement {
    /// The first condition.
    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        child(&self.syntax)
    }

    /// Statements run when the condition holds.
    #[must_use]
    pub fn consequence(&self) -> Option<Block> {
        child(&self.syntax)
    }

    /// `ELSIF` branches, in order.
    pub fn elsif_clauses(&self) -> impl Iterator<Item = ElsifClause> {
        children(&self.syntax)
    }

    /// The `ELSE` branch.
    #[must_use]
    pub fn else_clause(&self) -> Option<ElseClause> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `ELSIF cond THEN ...`
    ElsifClause => ElsifClause
);

impl ElsifClause {
    /// The branch condition.
    #[must_use]
    pub fn condition(&self) -> Option<Expr> {
        child(&self.syntax)
    }

    /// The branch body.
    #[must_use]
    pub fn consequence(&self) -> Option<Block> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `ELSE ...` of an IF or CASE statement
    ElseClause => ElseClause
);

impl ElseClause {
    /// The fallback body.
    #[must_use]
    pub fn body(&self) -> Option<Block> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `CASE value OF items [ELSE ...] END_CASE`
    CaseStatement => CaseStatement
);

impl CaseStatement {
    /// The matched value.
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        child(&self.syntax)
    }

    /// Case items in source order; the first matching item wins.
    pub fn items(&self) -> impl Iterator<Item = CaseItem> {
        children(&self.syntax)
    }

    /// The no-match fallback.
    #[must_use]
    pub fn else_clause(&self) -> Option<ElseClause> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `labels: body`
    CaseItem => CaseItem
);

impl CaseItem {
    /// Labels, in source order.
    pub fn labels(&self) -> impl Iterator<Item = CaseLabel> {
        children(&self.syntax)
    }

    /// The item body.
    #[must_use]
    pub fn body(&self) -> Option<Block> {
        child(&self.syntax)
    }
}

ast_node!(
    /// A single value or an inclusive range `start..end`
    CaseLabel => CaseLabel
);

impl CaseLabel {
    /// The single value, or the lower end of a range.
    #[must_use]
    pub fn start(&self) -> Option<Expr> {
        nth_child(&self.syntax, 0)
    }

    /// The upper end of a range.
    #[must_use]
    pub fn end(&self) -> Option<Expr> {
        if self.is_range() {
            nth_child(&self.syntax, 1)
        } else {
            None
        }
    }

    /// Returns `true` for `start..end` labels.
    #[must_use]
    pub fn is_range(&self) -> bool {
        token(&self.syntax, SyntaxKind::DotDot).is_some()
    }
}

ast_node!(
    /// `RETURN [expr]`
    ReturnStatement => ReturnStatement
);

impl ReturnStatement {
    /// The returned value.
    #[must_use]
    pub fn expression(&self) -> Option<Expr> {
        child(&self.syntax)
    }
}

// =============================================================================
// Expressions
// =============================================================================

ast_node!(
    /// A single name
    Identifier => Identifier
);

impl Identifier {
    /// The identifier token.
    #[must_use]
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.syntax, SyntaxKind::Ident)
    }

    /// The name as written.
    #[must_use]
    pub fn name(&self) -> SmolStr {
        self.token()
            .map(|token| SmolStr::new(token.text()))
            .unwrap_or_default()
    }
}

ast_node!(
    /// Dotted path with at least two segments
    QualifiedIdentifier => QualifiedIdentifier
);

impl QualifiedIdentifier {
    /// Path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = Identifier> {
        children(&self.syntax)
    }

    /// The path joined with `.`, without trivia.
    #[must_use]
    pub fn path(&self) -> SmolStr {
        let segments: Vec<SmolStr> = self.segments().map(|segment| segment.name()).collect();
        SmolStr::new(segments.join("."))
    }
}

ast_node!(
    /// `-x` or `NOT x`
    UnaryExpression => UnaryExpression
);

impl UnaryExpression {
    /// The operator token.
    #[must_use]
    pub fn operator(&self) -> Option<SyntaxToken> {
        first_significant_token(&self.syntax)
    }

    /// The operand.
    #[must_use]
    pub fn operand(&self) -> Option<Expr> {
        child(&self.syntax)
    }
}

macro_rules! infix_accessors {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// Left operand.
                #[must_use]
                pub fn left(&self) -> Option<Expr> {
                    nth_child(&self.syntax, 0)
                }

                /// The operator token.
                #[must_use]
                pub fn operator(&self) -> Option<SyntaxToken> {
                    first_significant_token(&self.syntax)
                }

                /// Right operand.
                #[must_use]
                pub fn right(&self) -> Option<Expr> {
                    nth_child(&self.syntax, 1)
                }
            }
        )*
    };
}

ast_node!(
    /// `+ - * / MOD **`
    BinaryOperator => BinaryOperator
);
ast_node!(
    /// `AND OR XOR`
    BooleanOperator => BooleanOperator
);
ast_node!(
    /// `< <= > >=`
    ComparisonOperator => ComparisonOperator
);
ast_node!(
    /// `= <>`
    EqualityOperator => EqualityOperator
);

infix_accessors!(
    BinaryOperator,
    BooleanOperator,
    ComparisonOperator,
    EqualityOperator
);

ast_node!(
    /// `(expr)`
    ParenthesizedExpression => ParenthesizedExpression
);

impl ParenthesizedExpression {
    /// The wrapped expression.
    #[must_use]
    pub fn inner(&self) -> Option<Expr> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `name(args)`
    FunctionCall => FunctionCall
);

impl FunctionCall {
    /// The called function.
    #[must_use]
    pub fn name(&self) -> Option<Expr> {
        nth_child(&self.syntax, 0)
    }

    /// The argument list.
    #[must_use]
    pub fn arguments(&self) -> Option<ArgumentList> {
        child(&self.syntax)
    }
}

ast_node!(
    /// `SOURCE_TO_TARGET(value)`
    TypeConversion => TypeConversion
);

impl TypeConversion {
    /// The conversion function name token, e.g. `REAL_TO_INT`.
    #[must_use]
    pub fn conversion_type(&self) -> Option<SyntaxToken> {
        child::<Identifier>(&self.syntax)?.token()
    }

    /// The converted value.
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        self.arguments()?.params().next()?.value()
    }

    /// The argument list.
    #[must_use]
    pub fn arguments(&self) -> Option<ArgumentList> {
        child(&self.syntax)
    }

    /// The type converted from.
    #[must_use]
    pub fn source_type(&self) -> Option<SmolStr> {
        let token = self.conversion_type()?;
        let (source, _) = token.text().split_once("_TO_")?;
        Some(SmolStr::new(source))
    }

    /// The type converted to.
    #[must_use]
    pub fn target_type(&self) -> Option<SmolStr> {
        let token = self.conversion_type()?;
        let (_, target) = token.text().split_once("_TO_")?;
        Some(SmolStr::new(target))
    }
}

ast_node!(
    /// `( param, ... )`
    ArgumentList => ArgumentList
);

impl ArgumentList {
    /// Arguments in source order.
    pub fn params(&self) -> impl Iterator<Item = ParamAssignment> {
        children(&self.syntax)
    }
}

/// The three argument forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// `expr`
    Positional,
    /// `name := expr`
    Named,
    /// `[NOT] name => target`
    Output,
}

ast_node!(
    /// One call argument
    ParamAssignment => ParamAssignment
);

impl ParamAssignment {
    /// Returns the argument form.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        if token(&self.syntax, SyntaxKind::Arrow).is_some() {
            ParamKind::Output
        } else if token(&self.syntax, SyntaxKind::Assign).is_some() {
            ParamKind::Named
        } else {
            ParamKind::Positional
        }
    }

    /// The formal parameter name of a named or output argument.
    #[must_use]
    pub fn name(&self) -> Option<Identifier> {
        match self.kind() {
            ParamKind::Positional => None,
            ParamKind::Named | ParamKind::Output => child(&self.syntax),
        }
    }

    /// The passed value of a positional or named argument.
    #[must_use]
    pub fn value(&self) -> Option<Expr> {
        match self.kind() {
            ParamKind::Positional => child(&self.syntax),
            ParamKind::Named => child_after(&self.syntax, SyntaxKind::Assign),
            ParamKind::Output => None,
        }
    }

    /// Returns `true` for `NOT name => target`.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        token(&self.syntax, SyntaxKind::KwNot).is_some()
    }

    /// The variable receiving an output argument.
    #[must_use]
    pub fn output_target(&self) -> Option<Expr> {
        child_after(&self.syntax, SyntaxKind::Arrow)
    }
}

ast_node!(
    /// `42`, `16#FF`, `2#1010`
    IntegerLiteral => IntegerLiteral
);
ast_node!(
    /// `3.14`, `1.0E10`
    FloatLiteral => FloatLiteral
);
ast_node!(
    /// `T#1d2h`
    TimeLiteral => TimeLiteralExpr
);
ast_node!(
    /// `TRUE` / `FALSE`
    BooleanLiteral => BooleanLiteral
);
ast_node!(
    /// `'text'`
    StringLiteral => StringLiteralExpr
);

macro_rules! literal_token {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// The literal token.
                #[must_use]
                pub fn token(&self) -> Option<SyntaxToken> {
                    first_significant_token(&self.syntax)
                }
            }
        )*
    };
}

literal_token!(IntegerLiteral, FloatLiteral, TimeLiteral, BooleanLiteral, StringLiteral);

impl IntegerLiteral {
    /// The numeric value, honoring `2#`, `8#` and `16#` prefixes and `_`
    /// separators. `None` when the value does not fit in `u64`.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        let token = self.token()?;
        let text = token.text();
        let (radix, digits) = match text.split_once('#') {
            Some((base, digits)) => (base.parse::<u32>().ok()?, digits),
            None => (10, text),
        };
        let digits: String = digits.chars().filter(|c| *c != '_').collect();
        u64::from_str_radix(&digits, radix).ok()
    }
}

impl BooleanLiteral {
    /// The literal value.
    #[must_use]
    pub fn value(&self) -> bool {
        self.token()
            .is_some_and(|token| token.kind() == SyntaxKind::KwTrue)
    }
}

impl StringLiteral {
    /// The text between the quotes.
    #[must_use]
    pub fn value(&self) -> Option<SmolStr> {
        let token = self.token()?;
        let inner = token.text().strip_prefix('\'')?.strip_suffix('\'')?;
        Some(SmolStr::new(inner))
    }
}

ast_enum!(
    /// Any expression.
    Expr {
        Identifier,
        QualifiedIdentifier,
        UnaryExpression,
        BinaryOperator,
        BooleanOperator,
        ComparisonOperator,
        EqualityOperator,
        ParenthesizedExpression,
        FunctionCall,
        TypeConversion,
        IntegerLiteral,
        FloatLiteral,
        TimeLiteral,
        BooleanLiteral,
        StringLiteral,
    }
);
