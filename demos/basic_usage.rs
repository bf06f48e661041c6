use anyhow::Result;
use icode_api::api::{MessageKind, MoreWorksBy, SortType, WorkQuery, WorkSubmission};
use icode_api::links::work_id_from_url;
use icode_api::tools;
use icode_api::{ClientConfig, IcodeClient};

const WORK_URL: &str = "https://icodeshequ.youdao.com/work/a1f09b5eb34a48dfbdc8dee59d130ec6";

/// Example 1: browsing without an account
async fn example_browse() -> Result<()> {
    let client = IcodeClient::new(ClientConfig::default())?;

    let work_id = work_id_from_url(WORK_URL)?;
    let detail = client.get_work_detail(&work_id, false).await?;
    println!("Work: {} by {:?}", detail.title, detail.user_name);
    println!(
        "Views: {:?}, likes: {:?}",
        detail.browse_num, detail.like_num
    );

    let comments = client.get_work_comments(&work_id, 1, 10).await?;
    for comment in &comments {
        println!("[{:?}] {}", comment.posted_at(), comment.content);
    }

    let more = client
        .get_more_works(&MoreWorksBy::Work(work_id.clone()))
        .await?;
    println!("More works by the same author: {}", more.len());

    let query = WorkQuery {
        sort: SortType::MostLiked,
        size: 5,
        ..WorkQuery::default()
    };
    for work in client.get_works(&query).await? {
        println!("{} {}", work.id, work.title);
    }

    Ok(())
}

/// Example 2: account operations
async fn example_account() -> Result<()> {
    let client = IcodeClient::connect(ClientConfig::new("your_cookie_here")).await?;
    let Some(me) = client.info() else {
        println!("Cookie rejected, skipping");
        return Ok(());
    };
    println!("Logged in as {}", me.user_id);

    let messages = client.get_messages(MessageKind::Reply, 1, 10).await?;
    println!("Unread replies page: {} messages", messages.len());

    let work = WorkSubmission::python("print('hello icode')")
        .with_title("Hello")
        .save_only(true);
    let saved = client.submit_work(&work).await?;
    println!("Saved: {saved}");

    Ok(())
}

/// Example 3: download a work next to the current directory
async fn example_download() -> Result<()> {
    let client = IcodeClient::new(ClientConfig::default())?;
    let work_id = work_id_from_url(WORK_URL)?;
    let path = tools::download_work(&client, &work_id, ".").await?;
    println!("Saved to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("=== icode-api examples ===\n");

    println!("Example 1: browsing");
    if let Err(e) = example_browse().await {
        println!("Error: {}", e);
    }

    println!("\nExample 2: account");
    if let Err(e) = example_account().await {
        println!("Error: {}", e);
    }

    println!("\nExample 3: download");
    if let Err(e) = example_download().await {
        println!("Error: {}", e);
    }

    Ok(())
}
