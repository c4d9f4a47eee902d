//! A use is qualified only when the import is the nearest declaration of its
//! name. Every case here either keeps a local binding intact or proves an
//! outer use is still rewritten.

use crate::options::RewriteOptions;
use crate::transform::transform_module;

fn rewrite(code: &str) -> String {
    transform_module(code, "test.mjs", &RewriteOptions::default())
        .unwrap()
        .code
}

const VUE: &str = "const __esm_import_0__ = await __esm_import__(\"vue\");";

/// Asserts that only the import statement changed.
fn assert_body_untouched(import: &str, body: &str) {
    let source = format!("{}{}", import, body);
    assert_eq!(
        rewrite(&source),
        format!("{}{}", VUE, body),
        "body should be left as written: {}",
        body
    );
}

#[test]
fn test_method_name_is_not_rewritten() {
    assert_eq!(
        rewrite("import { fn } from 'vue';class A { fn() { fn() } }"),
        format!("{}class A {{ fn() {{ __esm_import_0__.fn() }} }}", VUE)
    );
}

#[test]
fn test_class_field_names_are_not_references() {
    assert_body_untouched(
        "import { remove, add } from 'vue';",
        "class A {\n  remove = 1\n  add = null\n}",
    );
}

#[test]
fn test_local_const_shadows() {
    assert_body_untouched(
        "import { fn } from 'vue';",
        "function A(){ const fn = () => {}; return { fn }; }",
    );
}

#[test]
fn test_object_destructuring_shadows() {
    assert_body_untouched(
        "import { fn } from 'vue';",
        "function A(){ let {fn, test} = {fn: 'foo', test: 'bar'}; return { fn }; }",
    );
}

#[test]
fn test_array_destructuring_shadows() {
    assert_body_untouched(
        "import { fn } from 'vue';",
        "function A(){ let [fn, test] = ['foo', 'bar']; return { fn }; }",
    );
}

#[test]
fn test_function_declaration_shadows() {
    assert_body_untouched(
        "import { fn } from 'vue';",
        "function A(){ function fn() {}; return { fn }; }",
    );
}

#[test]
fn test_catch_parameter_shadows() {
    assert_eq!(
        rewrite("import {error} from './dependency';try {} catch(error) {}"),
        "const __esm_import_0__ = await __esm_import__(\"./dependency\");try {} catch(error) {}"
    );
}

#[test]
fn test_parameter_shadows() {
    assert_body_untouched(
        "import { Base } from 'vue';",
        "function make(Base) { class A extends Base {} return A }",
    );
}

#[test]
fn test_template_literal_in_parameter_default() {
    assert_eq!(
        rewrite("import { fn } from 'vue';function A({foo = `test${fn}`} = {}){ return {}; }"),
        format!("{}function A({{foo = `test${{__esm_import_0__.fn}}`}} = {{}}){{ return {{}}; }}", VUE)
    );
}

#[test]
fn test_destructured_parameter_default() {
    assert_eq!(
        rewrite("import { fn } from 'vue';function A({foo = fn}){ return {}; }"),
        format!("{}function A({{foo = __esm_import_0__.fn}}){{ return {{}}; }}", VUE)
    );
}

#[test]
fn test_overwrite_bindings() {
    let body_in = "const a = { inject }\n\
                   const b = { test: inject }\n\
                   function c() { const { test: inject } = { test: true }; console.log(inject) }\n\
                   const d = inject \n\
                   function f() {  console.log(inject) }\n\
                   function e() { const { inject } = { inject: true } }\n\
                   function g() { const f = () => { const inject = true }; console.log(inject) }\n";
    let body_out = "const a = { inject: __esm_import_0__.inject }\n\
                    const b = { test: __esm_import_0__.inject }\n\
                    function c() { const { test: inject } = { test: true }; console.log(inject) }\n\
                    const d = __esm_import_0__.inject \n\
                    function f() {  console.log(__esm_import_0__.inject) }\n\
                    function e() { const { inject } = { inject: true } }\n\
                    function g() { const f = () => { const inject = true }; console.log(__esm_import_0__.inject) }\n";
    assert_eq!(
        rewrite(&format!("import {{ inject }} from 'vue';{}", body_in)),
        format!("{}{}", VUE, body_out)
    );
}

#[test]
fn test_function_argument_destructure() {
    let source = "\nimport { foo, bar } from 'foo'\n\
                  const a = ({ _ = foo() }) => {}\n\
                  function b({ _ = bar() }) {}\n\
                  function c({ _ = bar() + foo() }) {}\n";
    let expected = "\nconst __esm_import_0__ = await __esm_import__(\"foo\");\n\
                    const a = ({ _ = __esm_import_0__.foo() }) => {}\n\
                    function b({ _ = __esm_import_0__.bar() }) {}\n\
                    function c({ _ = __esm_import_0__.bar() + __esm_import_0__.foo() }) {}\n";
    assert_eq!(rewrite(source), expected);
}

#[test]
fn test_object_destructure_alias() {
    let source = "import { n } from 'vue'\n\
                  const a = () => {\n  const { type: n = 'bar' } = {}\n  console.log(n)\n}\n";
    let expected = format!(
        "{}\nconst a = () => {{\n  const {{ type: n = 'bar' }} = {{}}\n  console.log(n)\n}}\n",
        VUE
    );
    assert_eq!(rewrite(source), expected);
}

#[test]
fn test_nested_object_destructure_alias() {
    let calls = "remove()\nadd()\nget()\nset()\nrest()\nobjRest()\n";
    let qualified = calls
        .lines()
        .map(|line| format!("__esm_import_0__.{}\n", line))
        .collect::<String>();
    let inner = format!(
        "function a() {{\n  const {{\n    o: {{ remove }},\n    a: {{ b: {{ c: [ add ] }}}},\n    d: [{{ get }}, set, ...rest],\n    ...objRest\n  }} = foo\n\n{}}}\n\n",
        calls
    );
    let source = format!(
        "import {{ remove, add, get, set, rest, objRest }} from 'vue'\n\n{}{}",
        inner, calls
    );
    assert_eq!(rewrite(&source), format!("{}\n\n{}{}", VUE, inner, qualified));
}

#[test]
fn test_declarations_shadow_their_whole_scope() {
    let inner = "function foobar() {\n  ddd()\n\n  const aaa = () => {\n    bbb(ccc)\n    ddd()\n  }\n  const bbb = () => {\n    console.log('hi')\n  }\n  const ccc = 1\n  function ddd() {}\n\n  aaa()\n  bbb()\n  ccc()\n}\n\n";
    let source = format!(
        "import {{ aaa, bbb, ccc, ddd }} from 'vue'\n\n{}aaa()\nbbb()\n",
        inner
    );
    assert_eq!(
        rewrite(&source),
        format!("{}\n\n{}__esm_import_0__.aaa()\n__esm_import_0__.bbb()\n", VUE, inner)
    );
}

#[test]
fn test_var_in_block_shadows_function_wide() {
    assert_body_untouched(
        "import { x } from 'vue';",
        "function f() { x(); { var x = 1; } }",
    );
}

#[test]
fn test_block_let_shadows_only_the_block() {
    assert_eq!(
        rewrite("import { x } from 'vue';function f() { { let x = 1; x } x }"),
        format!("{}function f() {{ {{ let x = 1; x }} __esm_import_0__.x }}", VUE)
    );
}

#[test]
fn test_named_function_expression_shadows_inside() {
    assert_eq!(
        rewrite("import { go } from 'vue';const h = function go() { return go }; go()"),
        format!("{}const h = function go() {{ return go }}; __esm_import_0__.go()", VUE)
    );
}

#[test]
fn test_default_value_closure_keeps_its_own_parameter() {
    assert_eq!(
        rewrite("import { v } from 'vue';function f(a = (v) => v, b = v) {}"),
        format!("{}function f(a = (v) => v, b = __esm_import_0__.v) {{}}", VUE)
    );
}

#[test]
fn test_typeof_and_update_are_rewritten() {
    assert_eq!(
        rewrite("import { ready } from 'vue';if (typeof ready === 'function') ready()"),
        format!(
            "{}if (typeof __esm_import_0__.ready === 'function') __esm_import_0__.ready()",
            VUE
        )
    );
}

#[test]
fn test_globals_are_left_alone() {
    assert_body_untouched("import 'vue';", "console.log(window, globalThis.x)");
}

#[test]
fn test_parameter_default_ignores_body_declarations() {
    assert_eq!(
        rewrite("import { x } from 'vue';\nfunction f(a = x) { const x = 1; return a }"),
        format!("{}\nfunction f(a = __esm_import_0__.x) {{ const x = 1; return a }}", VUE)
    );
    assert_eq!(
        rewrite("import { x } from 'vue';\nconst g = (a = x) => { let x = 2; return x }"),
        format!("{}\nconst g = (a = __esm_import_0__.x) => {{ let x = 2; return x }}", VUE)
    );
    assert_eq!(
        rewrite("import { x } from 'vue';\nfunction h(a = x) { var x; return a }"),
        format!("{}\nfunction h(a = __esm_import_0__.x) {{ var x; return a }}", VUE)
    );
}

#[test]
fn test_export_list_ignores_nested_shadow() {
    assert_eq!(
        rewrite("import {inject} from 'vue'; export {inject}\nfunction f(){ const inject = 1 }"),
        format!(
            "{} Object.defineProperty(__esm_exports__, \"inject\", {{ enumerable: true, configurable: true, get(){{ return __esm_import_0__.inject }}}});\nfunction f(){{ const inject = 1 }}",
            VUE
        )
    );
}
