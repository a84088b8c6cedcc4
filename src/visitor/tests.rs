// Sat Oct 17 2026 - Alex

use super::*;
use crate::model::{Access, BaseClassSpecifier, ClassKind, MethodFlags, TypeId};
use crate::tree::{
    AccessSpecifier, BaseSpecifier, DefaultArg, EnumDecl, FieldDecl, FunctionDecl, MethodDecl,
    NamespaceDecl, ParamDecl, RawTemplateArg, RawType, RecordDecl, TagKind, TypedefDecl,
};

fn visit(unit: &TranslationUnit) -> (Model, VisitStats) {
    visit_with(unit, VisitorOptions::default())
}

fn visit_with(unit: &TranslationUnit, options: VisitorOptions) -> (Model, VisitStats) {
    let mut model = Model::new();
    let stats = DeclarationVisitor::new(unit, &mut model).with_options(options).visit();
    (model, stats)
}

fn method_names(model: &Model, class: &str) -> Vec<String> {
    model
        .class_by_name(class)
        .unwrap()
        .methods
        .iter()
        .map(|m| m.name.clone())
        .collect()
}

#[test]
fn test_single_inheritance() {
    let unit = TranslationUnit::new("base.h")
        .with_decl(Decl::Record(
            RecordDecl::new("Base", TagKind::Struct)
                .with_method(MethodDecl::destructor("Base").with_virtual()),
        ))
        .with_decl(Decl::Record(
            RecordDecl::new("Derived", TagKind::Struct)
                .with_base(BaseSpecifier::new(RawType::record("Base"), AccessSpecifier::Public))
                .with_field(FieldDecl::new("x", RawType::builtin("int"))),
        ));

    let (model, _) = visit(&unit);
    assert_eq!(model.class_count(), 2);

    let base = model.find_class("Base").unwrap();
    let derived = model.class_by_name("Derived").unwrap();
    assert_eq!(
        derived.base_classes(),
        &[BaseClassSpecifier {
            base,
            access: Access::Public,
            is_virtual: false,
        }]
    );
    assert_eq!(derived.kind, ClassKind::Struct);
    assert_eq!(derived.file_name.as_deref(), Some("base.h"));

    let x = derived.find_field("x").unwrap();
    assert_eq!(model.types.spelling(x.ty), "int");

    let destructor = &model.class(base).methods[0];
    assert_eq!(destructor.name, "~Base");
    assert!(destructor.is_destructor());
    assert!(destructor.is_virtual());
}

#[test]
fn test_const_alias_qualifies_pointer() {
    let int_ptr = RawType::pointer(RawType::builtin("int"));
    let unit = TranslationUnit::new("f.h")
        .with_decl(Decl::Typedef(TypedefDecl::new("IntPtr", int_ptr.clone())))
        .with_decl(Decl::Function(FunctionDecl::new("f", RawType::void()).with_param(
            ParamDecl::new("p", RawType::typedef("IntPtr", int_ptr).with_const()),
        )));

    let (model, _) = visit(&unit);
    let f = model.function(model.find_function("f(int* const)").unwrap());
    let ty = model.types.get(f.parameters[0].ty);

    assert_eq!(ty.name, "int");
    assert_eq!(ty.pointer_depth(), 1);
    assert_eq!(ty.const_pointers, vec![true]);
    assert!(!ty.is_const);
    assert_eq!(ty.alias, model.find_typedef("IntPtr"));
}

#[test]
fn test_scoped_enum_members() {
    let unit = TranslationUnit::new("color.h").with_decl(Decl::Enum(
        EnumDecl::new("Color").scoped().with_member("Red", 0).with_member("Green", 1),
    ));

    let (model, _) = visit(&unit);
    let color = model.enumeration(model.find_enum("Color").unwrap());
    assert!(color.is_scoped);
    assert_eq!(color.member_names().collect::<Vec<_>>(), vec!["Color::Red", "Color::Green"]);
}

#[test]
fn test_unscoped_enum_members_and_forward_enum() {
    let unit = TranslationUnit::new("mode.h")
        .with_decl(Decl::Enum(EnumDecl::new("Mode").with_member("Fast", 0)))
        .with_decl(Decl::Enum(EnumDecl::new("Later").scoped().forward()));

    let (model, _) = visit(&unit);
    let mode = model.enumeration(model.find_enum("Mode").unwrap());
    assert_eq!(mode.member_names().collect::<Vec<_>>(), vec!["Fast"]);
    assert_eq!(model.find_enum("Later"), None);
}

#[test]
fn test_forward_declaration_upgraded_in_place() {
    let first = TranslationUnit::new("holder.h")
        .with_decl(Decl::Record(RecordDecl::forward("Widget", TagKind::Class)))
        .with_decl(Decl::Record(RecordDecl::new("Holder", TagKind::Class).with_field(
            FieldDecl::new("widget", RawType::pointer(RawType::record("Widget"))),
        )));
    let second = TranslationUnit::new("widget.h").with_decl(Decl::Record(
        RecordDecl::new("Widget", TagKind::Class)
            .with_method(MethodDecl::new("show", RawType::void())),
    ));

    let mut model = Model::new();
    translate([&first], &mut model, VisitorOptions::default());
    let handle = model.find_class("Widget").unwrap();
    assert!(!model.class(handle).has_definition());

    let field_type = model.class_by_name("Holder").unwrap().fields[0].ty;
    assert_eq!(model.types.get(field_type).class_id(), Some(handle));

    translate([&second], &mut model, VisitorOptions::default());
    assert_eq!(model.find_class("Widget"), Some(handle));
    assert!(model.class(handle).has_definition());
    assert_eq!(model.class(handle).methods.len(), 1);
    assert_eq!(model.class(handle).file_name.as_deref(), Some("widget.h"));
    assert_eq!(model.class_count(), 2);
}

#[test]
fn test_alias_and_direct_spelling_share_identity() {
    let foo_ptr = RawType::pointer(RawType::record("Foo"));
    let unit = TranslationUnit::new("foo.h")
        .with_decl(Decl::Record(RecordDecl::new("Foo", TagKind::Class)))
        .with_decl(Decl::Typedef(TypedefDecl::new("FooPtr", foo_ptr.clone())))
        .with_decl(Decl::Record(
            RecordDecl::new("User", TagKind::Class)
                .with_field(FieldDecl::new("a", RawType::typedef("FooPtr", foo_ptr.clone())))
                .with_field(FieldDecl::new("b", foo_ptr)),
        ));

    let (model, _) = visit(&unit);
    let user = model.class_by_name("User").unwrap();
    assert_eq!(user.fields[0].ty, user.fields[1].ty);
    assert_eq!(model.types.spelling(user.fields[0].ty), "Foo*");
}

#[test]
fn test_pointer_to_alias_composition() {
    let int_ptr = RawType::pointer(RawType::builtin("int"));
    let c_str = RawType::pointer(RawType::builtin("char").with_const());
    let unit = TranslationUnit::new("alias.h").with_decl(Decl::Record(
        RecordDecl::new("Args", TagKind::Struct)
            .with_field(FieldDecl::new(
                "pp",
                RawType::pointer(RawType::typedef("IntPtr", int_ptr)),
            ))
            .with_field(FieldDecl::new(
                "argv",
                RawType::pointer(RawType::typedef("CStr", c_str).with_const()),
            )),
    ));

    let (model, _) = visit(&unit);
    let args = model.class_by_name("Args").unwrap();

    let pp = model.types.get(args.fields[0].ty);
    assert_eq!(pp.pointer_depth(), 2);
    assert_eq!(pp.const_pointers, vec![false, false]);
    assert_eq!(pp.name, "int");

    let argv = model.types.get(args.fields[1].ty);
    assert_eq!(argv.const_pointers, vec![true, false]);
    assert!(argv.is_const);
    assert_eq!(model.types.spelling(args.fields[1].ty), "const char* const*");

    // Aliases only seen at use sites still become entities
    assert!(model.find_typedef("IntPtr").is_some());
    assert!(model.find_typedef("CStr").is_some());
}

#[test]
fn test_unsupported_parameters_skip_only_the_method() {
    let unit = TranslationUnit::new("moves.h").with_decl(Decl::Record(
        RecordDecl::new("Buffer", TagKind::Class)
            .with_method(MethodDecl::new("take", RawType::void()).with_param(ParamDecl::new(
                "other",
                RawType::rvalue_reference(RawType::record("Buffer")),
            )))
            .with_method(
                MethodDecl::new("fill", RawType::void())
                    .with_param(ParamDecl::new("value", RawType::template_param("T"))),
            )
            .with_method(
                MethodDecl::new("resize", RawType::void())
                    .with_param(ParamDecl::new("size", RawType::builtin("int"))),
            ),
    ));

    let (model, stats) = visit(&unit);
    assert_eq!(method_names(&model, "Buffer"), vec!["resize"]);
    assert_eq!(stats.skipped_methods, 2);
}

#[test]
fn test_anonymous_fields_are_dropped() {
    let unit = TranslationUnit::new("variant.h").with_decl(Decl::Record(
        RecordDecl::new("Variant", TagKind::Struct)
            .with_field(FieldDecl::new("", RawType::anonymous()))
            .with_field(FieldDecl::new("data", RawType::anonymous()))
            .with_field(FieldDecl::new("kind", RawType::builtin("int"))),
    ));

    let (model, stats) = visit(&unit);
    let variant = model.class_by_name("Variant").unwrap();
    assert_eq!(variant.fields.len(), 1);
    assert_eq!(variant.fields[0].name, "kind");
    assert_eq!(stats.skipped_fields, 2);
}

fn label_unit() -> TranslationUnit {
    let string_ref = RawType::reference(RawType::record("QString").with_const());
    TranslationUnit::new("label.h").with_decl(Decl::Record(
        RecordDecl::new("Label", TagKind::Class)
            .with_static_assert("qt_property:(QString text READ text WRITE setText)")
            .with_method(MethodDecl::new("text", RawType::record("QString")).with_const())
            .with_method(
                MethodDecl::new("setText", RawType::void())
                    .with_param(ParamDecl::new("text", string_ref)),
            )
            .with_method(MethodDecl::new("textChanged", RawType::void()).with_attribute("qt_signal"))
            .with_method(MethodDecl::new("clear", RawType::void()).with_attribute("qt_slot")),
    ))
}

#[test]
fn test_framework_metadata_becomes_flags() {
    let (model, _) = visit_with(&label_unit(), VisitorOptions::default().with_qt_mode(true));
    let label = model.class_by_name("Label").unwrap();
    let flags = |name: &str| label.find_methods(name).next().unwrap().flags;

    assert!(flags("text").contains(MethodFlags::PROPERTY_READ | MethodFlags::CONST));
    assert!(flags("setText").contains(MethodFlags::PROPERTY_WRITE));
    assert!(flags("textChanged").contains(MethodFlags::SIGNAL));
    assert!(flags("clear").contains(MethodFlags::SLOT));
}

#[test]
fn test_framework_metadata_ignored_without_qt_mode() {
    let (model, _) = visit(&label_unit());
    let label = model.class_by_name("Label").unwrap();
    assert!(label.methods.iter().all(|m| !m.is_property_accessor()));
    assert!(label
        .methods
        .iter()
        .all(|m| !m.flags.intersects(MethodFlags::SIGNAL | MethodFlags::SLOT)));
}

#[test]
fn test_special_members() {
    let unit = TranslationUnit::new("flag.h").with_decl(Decl::Record(
        RecordDecl::new("Flag", TagKind::Class)
            .with_method(MethodDecl::constructor("Flag").with_explicit())
            .with_method(MethodDecl::conversion(RawType::builtin("bool")).with_const())
            .with_method(
                MethodDecl::new("operator=", RawType::void())
                    .with_param(ParamDecl::new(
                        "",
                        RawType::reference(RawType::record("Flag").with_const()),
                    ))
                    .with_deleted(),
            )
            .with_method(MethodDecl::new("check", RawType::builtin("bool")).with_pure()),
    ));

    let (model, _) = visit(&unit);
    let flag = model.class_by_name("Flag").unwrap();
    assert!(flag.is_abstract());

    let constructor = &flag.methods[0];
    assert!(constructor.is_constructor());
    assert!(constructor.flags.contains(MethodFlags::EXPLICIT));
    assert_eq!(model.types.spelling(constructor.return_type), "Flag*");
    assert_eq!(
        model.types.get(constructor.return_type).class_id(),
        model.find_class("Flag")
    );

    let conversion = &flag.methods[1];
    assert_eq!(conversion.name, "operator bool");
    assert!(conversion.flags.contains(MethodFlags::CONVERSION | MethodFlags::CONST));

    let assign = &flag.methods[2];
    assert!(assign.is_deleted());
    assert_eq!(assign.access, Access::Private);

    let check = &flag.methods[3];
    assert!(check.is_virtual());
    assert!(check.is_pure_virtual());
}

#[test]
fn test_default_arguments_are_qualified() {
    let mode = RawType::enumeration("ui::Widget::Mode");
    let unit = TranslationUnit::new("widget.h").with_decl(Decl::Namespace(
        NamespaceDecl::new("ui").with_decl(Decl::Record(
            RecordDecl::new("ui::Widget", TagKind::Class)
                .with_decl(Decl::Enum(
                    EnumDecl::new("ui::Widget::Mode")
                        .with_member("Fast", 1)
                        .with_member("Exact", 2),
                ))
                .with_method(
                    MethodDecl::new("setMode", RawType::void()).with_param(
                        ParamDecl::new("mode", mode.clone()).with_default(
                            DefaultArg::new("Mode(Fast | Exact)")
                                .with_reference("Mode", "ui::Widget::Mode")
                                .with_reference("Fast", "ui::Widget::Fast")
                                .with_reference("Exact", "ui::Widget::Exact"),
                        ),
                    ),
                )
                .with_method(
                    MethodDecl::new("reset", RawType::void()).with_param(
                        ParamDecl::new("mode", mode).with_default(
                            DefaultArg::new("Fast | Turbo")
                                .with_reference("Fast", "ui::Widget::Fast")
                                .with_reference("Turbo", "ui::Widget::Turbo"),
                        ),
                    ),
                ),
        )),
    ));

    let (model, _) = visit(&unit);
    let widget = model.class_by_name("ui::Widget").unwrap();
    let default_of = |name: &str| {
        widget.find_methods(name).next().unwrap().parameters[0]
            .default_value
            .clone()
    };

    assert_eq!(
        default_of("setMode").as_deref(),
        Some("ui::Widget::Mode(ui::Widget::Fast | ui::Widget::Exact)")
    );
    assert_eq!(default_of("reset").as_deref(), Some("Fast | Turbo"));
}

#[test]
fn test_enum_template_arguments_use_enumerator_names() {
    let flags = |value: i64| {
        RawType::specialization(
            "Flags",
            vec![RawTemplateArg::Integral {
                value,
                enum_name: Some("Option".to_string()),
            }],
        )
    };
    let unit = TranslationUnit::new("options.h")
        .with_decl(Decl::Enum(
            EnumDecl::new("Option").with_member("None", 0).with_member("Verbose", 2),
        ))
        .with_decl(Decl::Record(
            RecordDecl::new("Settings", TagKind::Struct)
                .with_field(FieldDecl::new("known", flags(2)))
                .with_field(FieldDecl::new("unknown", flags(9))),
        ));

    let (model, _) = visit(&unit);
    let settings = model.class_by_name("Settings").unwrap();
    assert_eq!(model.types.spelling(settings.fields[0].ty), "Flags<Verbose>");
    assert_eq!(model.types.spelling(settings.fields[1].ty), "Flags<9>");
}

#[test]
fn test_self_referential_class() {
    let node_ptr = RawType::pointer(RawType::record("Node"));
    let unit = TranslationUnit::new("list.h").with_decl(Decl::Record(
        RecordDecl::new("Node", TagKind::Struct)
            .with_field(FieldDecl::new("next", node_ptr.clone()))
            .with_method(MethodDecl::new("clone", node_ptr).with_const()),
    ));

    let (model, _) = visit(&unit);
    let node = model.find_class("Node").unwrap();
    let class = model.class(node);
    assert_eq!(model.types.get(class.fields[0].ty).class_id(), Some(node));
    assert_eq!(class.methods[0].return_type, class.fields[0].ty);
    assert_eq!(model.class_count(), 1);
}

#[test]
fn test_scopes_and_parents() {
    let unit = TranslationUnit::new("ui.h").with_decl(Decl::Namespace(
        NamespaceDecl::new("ui").with_decl(Decl::Namespace(
            NamespaceDecl::new("ui::detail").with_decl(Decl::Record(
                RecordDecl::new("ui::detail::Widget", TagKind::Class).with_decl(Decl::Record(
                    RecordDecl::new("ui::detail::Widget::Private", TagKind::Struct)
                        .with_field(FieldDecl::new("count", RawType::builtin("int"))),
                )),
            )),
        )),
    ));

    let (model, _) = visit(&unit);
    let ui = model.find_class("ui").unwrap();
    let detail = model.find_class("ui::detail").unwrap();
    let widget = model.find_class("ui::detail::Widget").unwrap();

    assert!(model.class(ui).is_namespace());
    assert_eq!(model.class(detail).parent, Some(ui));
    assert_eq!(model.class(widget).parent, Some(detail));
    assert_eq!(model.class(widget).nspace, "ui::detail");

    let private = model.class_by_name("ui::detail::Widget::Private").unwrap();
    assert_eq!(private.parent, Some(widget));
    assert_eq!(private.nspace, "ui::detail");
    assert_eq!(private.name, "Private");
}

#[test]
fn test_dependent_template_keeps_resolvable_members() {
    let unit = TranslationUnit::new("vector.h")
        .with_decl(Decl::Record(RecordDecl::new("Storage", TagKind::Class)))
        .with_decl(Decl::Record(
            RecordDecl::new("Vector", TagKind::Class)
                .dependent()
                .with_base(BaseSpecifier::new(RawType::record("Storage"), AccessSpecifier::Public))
                .with_method(MethodDecl::new("size", RawType::builtin("int")).with_const())
                .with_method(
                    MethodDecl::new("at", RawType::reference(RawType::template_param("T")))
                        .with_param(ParamDecl::new("i", RawType::builtin("int"))),
                ),
        ))
        .with_decl(Decl::Typedef(TypedefDecl::new(
            "Vector::value_type",
            RawType::template_param("T"),
        )));

    let (model, _) = visit(&unit);
    let vector = model.class_by_name("Vector").unwrap();
    assert!(vector.is_template);
    assert!(vector.bases.is_empty());
    assert_eq!(method_names(&model, "Vector"), vec!["size"]);
    assert_eq!(model.find_typedef("Vector::value_type"), None);
}

#[test]
fn test_free_functions() {
    let unit = TranslationUnit::new("math.h").with_decl(Decl::Namespace(
        NamespaceDecl::new("math")
            .with_decl(Decl::Function(
                FunctionDecl::new("math::max", RawType::builtin("int"))
                    .with_param(ParamDecl::new("a", RawType::builtin("int")))
                    .with_param(ParamDecl::new("b", RawType::builtin("int"))),
            ))
            .with_decl(Decl::Function(
                FunctionDecl::new("math::max", RawType::builtin("double"))
                    .with_param(ParamDecl::new("a", RawType::builtin("double")))
                    .with_param(ParamDecl::new("b", RawType::builtin("double"))),
            ))
            .with_decl(Decl::Function(FunctionDecl {
                is_deleted: true,
                ..FunctionDecl::new("math::gone", RawType::void())
            }))
            .with_decl(Decl::Function(FunctionDecl::new("math::consume", RawType::void()).with_param(
                ParamDecl::new("value", RawType::rvalue_reference(RawType::builtin("int"))),
            ))),
    ));

    let (model, stats) = visit(&unit);
    let int_max = model.find_function("math::max(int, int)").unwrap();
    let double_max = model.find_function("math::max(double, double)").unwrap();
    assert_ne!(int_max, double_max);
    assert_eq!(model.function(int_max).nspace, "math");
    assert_eq!(model.functions().count(), 2);
    assert_eq!(stats.skipped_functions, 1);
}

#[test]
fn test_function_pointer_and_array_types() {
    let callback = RawType::pointer(RawType::function(
        RawType::void(),
        vec![RawType::builtin("int")],
    ));
    let unit = TranslationUnit::new("timer.h").with_decl(Decl::Record(
        RecordDecl::new("Timer", TagKind::Struct)
            .with_field(FieldDecl::new("callback", callback))
            .with_field(FieldDecl::new(
                "grid",
                RawType::array(RawType::array(RawType::builtin("float"), 4), 3),
            ))
            .with_field(FieldDecl::new(
                "nested",
                RawType::pointer(RawType::reference(RawType::builtin("int"))),
            )),
    ));

    let (model, stats) = visit(&unit);
    let timer = model.class_by_name("Timer").unwrap();

    let callback = model.types.get(timer.fields[0].ty);
    assert!(callback.is_function_pointer());
    assert_eq!(model.types.spelling(timer.fields[0].ty), "void (*)(int)");

    let grid = model.types.get(timer.fields[1].ty);
    assert_eq!(grid.array_lengths, vec![3, 4]);
    assert_eq!(model.types.spelling(timer.fields[1].ty), "float[3][4]");

    assert_eq!(timer.fields.len(), 2);
    assert_eq!(stats.skipped_fields, 1);
}

#[test]
fn test_anonymous_type_is_invalid() {
    let unit = TranslationUnit::new("empty.h");
    let mut model = Model::new();
    let mut visitor = DeclarationVisitor::new(&unit, &mut model);
    assert_eq!(visitor.register_type(&RawType::anonymous()), Ok(TypeId::INVALID));
    assert_eq!(
        visitor.register_type(&RawType::rvalue_reference(RawType::builtin("int"))),
        Err(Unsupported::RvalueReference)
    );
    assert!(matches!(
        visitor.register_type(&RawType::template_param("T")),
        Err(Unsupported::Dependent(name)) if name == "T"
    ));
}

#[test]
fn test_enum_defined_in_later_unit_shares_type() {
    let first = TranslationUnit::new("paint.h")
        .with_decl(Decl::Enum(EnumDecl::new("Color").scoped().forward()))
        .with_decl(Decl::Function(
            FunctionDecl::new("paint", RawType::void())
                .with_param(ParamDecl::new("c", RawType::enumeration("Color"))),
        ));
    let second = TranslationUnit::new("color.h")
        .with_decl(Decl::Enum(EnumDecl::new("Color").scoped().with_member("Red", 0)))
        .with_decl(Decl::Function(
            FunctionDecl::new("fill", RawType::void())
                .with_param(ParamDecl::new("c", RawType::enumeration("Color"))),
        ));

    let mut model = Model::new();
    translate([&first, &second], &mut model, VisitorOptions::default());

    let paint = model.function(model.find_function("paint(Color)").unwrap()).parameters[0].ty;
    let fill = model.function(model.find_function("fill(Color)").unwrap()).parameters[0].ty;
    assert_eq!(paint, fill);
    assert_eq!(model.types.get(paint).enum_id(), model.find_enum("Color"));
    assert!(model.types.get(paint).enum_id().is_some());
}

#[test]
fn test_class_defined_in_later_unit_is_linked() {
    let first = TranslationUnit::new("show.h").with_decl(Decl::Function(
        FunctionDecl::new("show", RawType::void())
            .with_param(ParamDecl::new("w", RawType::pointer(RawType::record("Widget")))),
    ));
    let second = TranslationUnit::new("widget.h")
        .with_decl(Decl::Record(RecordDecl::new("Widget", TagKind::Class)));

    let mut model = Model::new();
    translate([&first], &mut model, VisitorOptions::default());
    let ty = model.function(model.find_function("show(Widget*)").unwrap()).parameters[0].ty;
    assert_eq!(model.types.get(ty).class_id(), None);

    translate([&second], &mut model, VisitorOptions::default());
    assert_eq!(model.types.get(ty).class_id(), model.find_class("Widget"));
    assert!(model.types.get(ty).class_id().is_some());
}

fn alias_unit() -> TranslationUnit {
    let int_ptr = RawType::pointer(RawType::builtin("int"));
    let file = RawType::record("_IO_FILE");
    TranslationUnit::new("io.h")
        .with_decl(Decl::Typedef(TypedefDecl::new("IntPtr", int_ptr.clone())))
        .with_decl(Decl::Typedef(TypedefDecl::new("FILE", file.clone())))
        .with_decl(Decl::Function(
            FunctionDecl::new("f", RawType::void())
                .with_param(ParamDecl::new("p", RawType::typedef("IntPtr", int_ptr).with_const())),
        ))
        .with_decl(Decl::Function(FunctionDecl::new("close", RawType::builtin("int")).with_param(
            ParamDecl::new("stream", RawType::pointer(RawType::typedef("FILE", file))),
        )))
}

#[test]
fn test_kept_aliases_use_their_own_name() {
    let options = VisitorOptions::default().with_resolve_typedefs(false);
    let (model, _) = visit_with(&alias_unit(), options);

    let f = model.function(model.find_function("f(const IntPtr)").unwrap());
    let ty = model.types.get(f.parameters[0].ty);
    assert_eq!(ty.name, "IntPtr");
    assert!(ty.is_const);
    assert_eq!(ty.pointer_depth(), 0);

    let typedef = ty.typedef_id().unwrap();
    assert_eq!(model.typedef(typedef).qualified_name, "IntPtr");
    assert_eq!(model.types.spelling(model.typedef(typedef).underlying), "int*");
}

#[test]
fn test_listed_aliases_survive_resolution() {
    let (model, _) = visit(&alias_unit());

    assert!(model.find_function("f(int* const)").is_some());
    let close = model.function(model.find_function("close(FILE*)").unwrap());
    let stream = model.types.get(close.parameters[0].ty);
    assert_eq!(stream.name, "FILE");
    assert_eq!(stream.const_pointers, vec![false]);
    assert_eq!(stream.typedef_id(), model.find_typedef("FILE"));

    let resolved = VisitorOptions::default().with_not_to_be_resolved(Vec::new());
    let (model, _) = visit_with(&alias_unit(), resolved);
    assert!(model.find_function("close(_IO_FILE*)").is_some());
}

#[test]
fn test_volatile_alias_qualifies_pointer() {
    let int_ptr = RawType::pointer(RawType::builtin("int"));
    let unit = TranslationUnit::new("port.h").with_decl(Decl::Record(
        RecordDecl::new("Port", TagKind::Struct)
            .with_field(FieldDecl::new(
                "reg",
                RawType::typedef("IntPtr", int_ptr.clone()).with_volatile(),
            ))
            .with_field(FieldDecl::new("plain", int_ptr)),
    ));

    let (model, _) = visit(&unit);
    let port = model.class_by_name("Port").unwrap();
    assert_ne!(port.fields[0].ty, port.fields[1].ty);

    let reg = model.types.get(port.fields[0].ty);
    assert!(!reg.is_volatile);
    assert_eq!(reg.volatile_pointers, vec![0]);
    assert_eq!(model.types.spelling(port.fields[0].ty), "int* volatile");
}

#[test]
fn test_default_argument_literals_are_untouched() {
    let unit = TranslationUnit::new("label.h").with_decl(Decl::Record(
        RecordDecl::new("Label", TagKind::Class)
            .with_decl(Decl::Enum(EnumDecl::new("Label::Mode").with_member("Fast", 1)))
            .with_method(
                MethodDecl::new("setText", RawType::void()).with_param(
                    ParamDecl::new("text", RawType::pointer(RawType::builtin("char").with_const()))
                        .with_default(
                            DefaultArg::new(r#"tr("Fast", Fast, 'F')"#)
                                .with_reference("Fast", "Label::Fast"),
                        ),
                ),
            ),
    ));

    let (model, _) = visit(&unit);
    let label = model.class_by_name("Label").unwrap();
    assert_eq!(
        label.methods[0].parameters[0].default_value.as_deref(),
        Some(r#"tr("Fast", Label::Fast, 'F')"#)
    );
}
