//! The fixed fundamental-analysis prompt
//!
//! Six numbered sections, each introduced by a keycap marker, followed by an
//! instruction to answer each section in one BUY/AVOID line and a worked
//! example in the expected shape.

/// Template source; placeholders: `stock_name`, `exchange`, `stock_data`
pub const FUNDAMENTAL_TEMPLATE: &str = r#"Perform a detailed fundamental analysis of {{ stock_name }} listed on {{ exchange }} using the following real-time financial data:
{{ stock_data }}


prompt 1:
Perform a detailed fundamental analysis of {{ stock_name }} listed on [Stock Exchange] using the latest available financial data, valuation metrics, and key insights.
Your analysis should cover the following aspects:
1️⃣ Financial Statements Analysis
✅ Revenue Growth – Year-over-Year (YoY) and Quarter-over-Quarter (QoQ) changes
 ✅ Profitability Metrics – Gross margin, net margin, and operating margin
 ✅ Earnings Per Share (EPS) – Trends and future projections
 ✅ Debt Levels – Debt-to-equity ratio, interest coverage
 ✅ Cash Flow Analysis – Trends in operating cash flow and free cash flow
2️⃣ Valuation Metrics
📈 Price-to-Earnings (P/E) Ratio – Compared to industry peers
 📈 Price-to-Book (P/B) Ratio
 📈 Enterprise Value-to-EBITDA (EV/EBITDA)
 📈 Dividend Yield (If applicable)
3️⃣ Growth Potential & Competitive Positioning
🚀 Industry Trends – Growth prospects for the sector
 🏆 Competitive Advantage – Does the company have a strong market position?
 💡 Innovation & R&D – Is the company investing in future growth?
 👨‍💼 Management & Leadership – CEO track record, key executives
4️⃣ Risk Analysis
⚠️ Market Risks – Macroeconomic factors, geopolitical risks
 ⚠️ Operational Risks – Supply chain issues, lawsuits, regulatory challenges
 ⚠️ Debt & Liquidity Risks – Is the company financially stable?
5️⃣ Recent News & Catalysts
📊 Latest Earnings Report – Did they beat or miss expectations?
 🤝 Mergers & Acquisitions – Recent deals or partnerships
 📜 Regulatory Changes – Any new laws affecting the company?
 📢 Major Product Launches – Potential impact on future revenue
6️⃣ Investment Outlook & Conclusion
📈 Bullish Case – Why the stock could go up
 📉 Bearish Case – Potential downside risks
 📅 Short-term vs. Long-term Perspective – Investment horizon analysis
prompt 2:
If you were Warren Buffett, would you invest in this stock? Justify your decision.
prompt 3:
Perform a Technical Analysis for {{ stock_name }} and identify the chart pattern it has formed.
prompt 4:
What is the latest news about {{ stock_name }}?
prompt 5:
Conduct a Sentiment Analysis for {{ stock_name }} based on the latest news and provide valid reasons for the sentiment classification (Positive, Negative, or Neutral).
prompt 6:
Provide the latest Indian stock market news in bullet points.



Clearly state ONLY whether I should BUY or AVOID this stock based on the above prompts with one line answer to each of the prompt and tell reason why (include numbers if you have).

example:
1️⃣ Fundamental Analysis
BUY — Robust free cash flow (~₹449 bn), net margins at ~19%, low debt (debt/EBITDA ~0.14), reasonable P/E (~25.6×) vs sector, with strong profitability and balance sheet .

2️⃣ Warren Buffett Style
BUY — TCS exhibits a durable moat, consistent earnings, high ROE (~50%), and substantial free cash flow—classic Buffett qualities .

3️⃣ Technical Analysis
AVOID — The stock is bearish in the short-term; it's below its 200-day MA (~₹3,886) and 52-week down ~10.7%, indicating potential continued weakness despite a neutral RSI (~49) .

4️⃣ Latest News
BUY — Expansion news: major realty spend (~₹4,500 cr), new 20‑acre Kolkata campus, multi-year AI/cloud tie-up with Microsoft, no breach from M&S hack .

5️⃣ Sentiment Analysis
NEUTRAL — Overall news is positive (growth projects, partnerships), but mixed with macro tech headwinds (post Accenture sell-off) and union pushback on staffing policies—balanced sentiment .

6️⃣ Latest Indian Market News
BUY — Indian IT sector pullback offers entry, and TCS remains a blue‑chip stable performer with solid dividend record, strong fundamentals amid volatile tech sentiment .
"#;
