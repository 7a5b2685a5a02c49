use crate::ClauseAnalyzer;

fn test_display(input: &str) -> String {
    let result = ClauseAnalyzer::default().analyze(input, false);
    format!("{}", result.display())
}

#[test]
fn prohibition() {
    insta::assert_snapshot!(test_display("The Tenant must not sublet the premises."), @r###"
    The  Tenant  must  not  sublet  the  premises.
                 ╰──╯Modal
                       ╰─╯Neg
         ╰────╯Party
                 ╰───────────────────────────────╯Obligation
    "###);
}

#[test]
fn defined_party() {
    insta::assert_snapshot!(test_display(r#"Acme Corp. (the "Supplier") shall deliver the goods to the Buyer."#), @r###"
    Acme  Corp.  (the  "Supplier")  shall  deliver  the  goods  to  the  Buyer.
                                    ╰───╯Modal
                                                                ╰╯Prep
    ╰─────────╯Party
                       ╰─────────╯Party
                                                                         ╰────╯Party
                                    ╰─────────────────────────────────────────╯Obligation
    "###);
}
