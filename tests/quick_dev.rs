use anyhow::Result;

/// Smoke-drives the main flows against a locally running server.
#[tokio::test]
#[ignore = "needs a running server on localhost:8080"]
async fn quick_dev() -> Result<()> {
    let hc = httpc_test::new_client("http://localhost:8080")?;

    // Anonymous global feed: page 1, default page size, isSession=false.
    hc.do_get("/").await?.print().await?;

    // Gated areas bounce anonymous visitors to /login.
    hc.do_get("/admin").await?.print().await?;
    hc.do_get("/authUser/dashboard").await?.print().await?;

    hc.do_post(
        "/register",
        (
            "inputFirstName=John&inputLastName=Doe&inputAddress=Somewhere\
             &inputNumber=5550100&inputOccupation=Tester\
             &inputEmail=testee%40gmal.com&inputPassword=123456",
            "application/x-www-form-urlencoded",
        ),
    )
    .await?
    .print()
    .await?;

    hc.do_post(
        "/login",
        (
            "inputEmail=testee%40gmal.com&inputPassword=123456",
            "application/x-www-form-urlencoded",
        ),
    )
    .await?
    .print()
    .await?;

    hc.do_get("/search?searchTerm=bitcoin").await?.print().await?;

    Ok(())
}
