use ronin_syntax::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 RONIN syntax demo\n");

    // Every finished query is printed as wire JSON
    let syntax = Syntax::from_env(|tree, options| {
        let query = Value::Object(tree).to_json();
        match options {
            Some(options) => println!("➡️  {query} (options: {options:?})"),
            None => println!("➡️  {query}"),
        }
        query
    })?;
    println!("✅ Roots ready: {:?}\n", syntax.verbs());

    // Plain queries
    println!("📖 Queries");
    syntax
        .get()?
        .step("account")
        .step("with")
        .step("handle")
        .call("juri");

    syntax
        .set()?
        .step("account")
        .call(Value::object([
            ("with", Value::object([("handle", "juri")])),
            ("to", Value::object([("activeAt", Utc::now())])),
        ]));

    // Sub-query: the inner query is embedded, not executed
    let get = syntax.get()?;
    syntax
        .add()?
        .step("accounts")
        .step("to")
        .call_with(|_| get.step("oldAccounts").invoke());

    // Field references and expressions
    syntax
        .set()?
        .step("accounts")
        .step("to")
        .call_with(|f| {
            Value::object([
                ("greeting", Value::from(format!("Hello {}", f.text("name")))),
                ("score", op(f.field("score"), Operator::Add, 1)),
            ])
        });

    // Batch: collected in order, handed to a runner
    println!("\n📦 Batch");
    let count = syntax.count()?;
    let transaction = syntax.try_batch(|| -> Result<_, QueryError> {
        Ok(vec![
            get.step("members")
                .step("with")
                .call(Value::object([("team", "red")]))
                .step("orderedBy")?
                .step("ascending")
                .call(Value::Array(vec!["joinedAt".into()])),
            count.step("members").invoke(),
        ])
    })?;
    for item in &transaction {
        println!("   {}", item.to_json());
    }

    // Schema
    println!("\n🏗️  Schema");
    let add = syntax.add()?;
    let model = Model::new("account")
        .plural_slug("accounts")
        .field("handle", string().step("required").invoke().step("unique")?.invoke())
        .field(
            "email",
            string()
                .step("check")
                .call_with(|f| op(f.field("email"), Operator::Ne, "")),
        )
        .group(
            "profile",
            FieldGroup::new()
                .field("firstName", string())
                .field("lastName", string()),
        )
        .field(
            "displayName",
            string().step("computedAs").call_with(|f| {
                Value::object([
                    ("kind", Value::from("VIRTUAL")),
                    (
                        "value",
                        concat([
                            f.field("profile.firstName"),
                            Value::from(" "),
                            f.field("profile.lastName"),
                        ]),
                    ),
                ])
            }),
        )
        .index(Index::new(["email"]).unique())
        .trigger(
            Trigger::new(TriggerTiming::After, TriggerAction::Insert).effects(|| {
                vec![add.step("member").step("with").call_with(|f| {
                    Value::object([("account", f.field("id"))])
                })]
            }),
        );
    syntax.create()?.step("model").call(model);

    println!("\n🎉 Demo completed!");
    Ok(())
}
